use serde::{Deserialize, Serialize};

/// 生成内容的目标语言
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum TargetLanguage {
    #[serde(rename = "hu")]
    #[default]
    Hungarian,
    #[serde(rename = "en")]
    English,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "zh")]
    Chinese,
    #[serde(rename = "fr")]
    French,
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetLanguage::Hungarian => write!(f, "hu"),
            TargetLanguage::English => write!(f, "en"),
            TargetLanguage::German => write!(f, "de"),
            TargetLanguage::Chinese => write!(f, "zh"),
            TargetLanguage::French => write!(f, "fr"),
        }
    }
}

impl std::str::FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hu" | "hungarian" | "magyar" => Ok(TargetLanguage::Hungarian),
            "en" | "english" => Ok(TargetLanguage::English),
            "de" | "german" | "deutsch" => Ok(TargetLanguage::German),
            "zh" | "chinese" | "中文" => Ok(TargetLanguage::Chinese),
            "fr" | "french" | "français" => Ok(TargetLanguage::French),
            _ => Err(format!("Unknown target language: {}", s)),
        }
    }
}

impl TargetLanguage {
    /// 获取语言的描述性名称
    pub fn display_name(&self) -> &'static str {
        match self {
            TargetLanguage::Hungarian => "Magyar",
            TargetLanguage::English => "English",
            TargetLanguage::German => "Deutsch",
            TargetLanguage::Chinese => "中文",
            TargetLanguage::French => "Français",
        }
    }

    /// 追加到系统提示词末尾的语言指令
    pub fn prompt_instruction(&self) -> &'static str {
        match self {
            TargetLanguage::Hungarian => {
                "Minden szöveges mezőt magyar nyelven írj. A JSON kulcsokat és a felsorolt konstans értékeket (pl. POSITIVE, HIGH) változatlanul hagyd."
            }
            TargetLanguage::English => {
                "Write every textual field in English. Keep JSON keys and enumerated constants (e.g. POSITIVE, HIGH) exactly as specified."
            }
            TargetLanguage::German => {
                "Schreiben Sie alle Textfelder auf Deutsch. JSON-Schlüssel und vorgegebene Konstanten (z. B. POSITIVE, HIGH) bleiben unverändert."
            }
            TargetLanguage::Chinese => {
                "所有文本字段请使用中文编写。JSON键名和枚举常量（如 POSITIVE、HIGH）保持原样。"
            }
            TargetLanguage::French => {
                "Rédigez tous les champs textuels en français. Conservez les clés JSON et les constantes énumérées (p. ex. POSITIVE, HIGH) telles quelles."
            }
        }
    }

    /// 用户可见的"格式错误，请重试"提示
    pub fn retry_notice(&self) -> &'static str {
        match self {
            TargetLanguage::Hungarian => {
                "Az AI válasza nem volt a megfelelő formátumban. Kérjük, próbálja újra!"
            }
            TargetLanguage::English => {
                "The AI's response was not in the expected format. Please try again!"
            }
            TargetLanguage::German => {
                "Die Antwort der KI hatte nicht das erwartete Format. Bitte versuchen Sie es erneut!"
            }
            TargetLanguage::Chinese => "AI的响应格式不正确，请重试！",
            TargetLanguage::French => {
                "La réponse de l'IA n'était pas au format attendu. Veuillez réessayer !"
            }
        }
    }

    /// 导师开始分析时显示的占位消息
    pub fn analysis_placeholder(&self) -> &'static str {
        match self {
            TargetLanguage::Hungarian => {
                "Rendben, nézzük is meg a piacot... Elemzés készítése az eddigi beszélgetés alapján."
            }
            TargetLanguage::English => {
                "Alright, let's look at the market... Preparing an analysis based on our conversation so far."
            }
            TargetLanguage::German => {
                "Gut, schauen wir uns den Markt an... Die Analyse wird auf Basis unseres bisherigen Gesprächs erstellt."
            }
            TargetLanguage::Chinese => "好的，我们来看看市场……正在根据目前的对话生成分析。",
            TargetLanguage::French => {
                "Très bien, examinons le marché... Préparation d'une analyse à partir de notre conversation."
            }
        }
    }

    /// 导师分析失败时替换占位消息的提示
    pub fn analysis_failed_notice(&self) -> &'static str {
        match self {
            TargetLanguage::Hungarian => {
                "Hoppá, hiba történt a piackutatás során. Kérjük, próbálja meg később, vagy egyértelműsítse az ötletét."
            }
            TargetLanguage::English => {
                "Oops, something went wrong during the market research. Please try again later or clarify your idea."
            }
            TargetLanguage::German => {
                "Hoppla, bei der Marktforschung ist ein Fehler aufgetreten. Bitte versuchen Sie es später erneut oder präzisieren Sie Ihre Idee."
            }
            TargetLanguage::Chinese => "哎呀，市场调研过程中出现错误。请稍后重试，或把你的想法说得更清楚一些。",
            TargetLanguage::French => {
                "Oups, une erreur est survenue pendant l'étude de marché. Réessayez plus tard ou précisez votre idée."
            }
        }
    }
}
