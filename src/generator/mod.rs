pub mod agents;
pub mod context;
pub mod error;
pub mod feature_agent;
pub mod mentor;
pub mod outlet;
pub mod state;
pub mod studio;
pub mod workflow;
