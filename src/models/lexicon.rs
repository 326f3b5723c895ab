//! 双语词表
//!
//! 自动挖掘词汇时使用的查找表：英文 → 葡萄牙文 词典 + 停用词集合。
//! 默认内容在编译期由 phf 生成；也可以从 TOML 文件加载另一套词表，
//! 以支持其他语言或语料。

use crate::error::{AppResult, LexiconError};
use phf::{phf_map, phf_set};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tokio::fs;

/// 每章自动挖掘词汇的默认上限
pub const DEFAULT_MAX_ENTRIES: usize = 12;

static DEFAULT_GLOSSARY: phf::Map<&'static str, &'static str> = phf_map! {
    // Curupira
    "forest" => "floresta",
    "creature" => "criatura",
    "mysterious" => "misterioso",
    "legendary" => "lendário",
    "protecting" => "protegendo",
    "backward" => "para trás",
    "footprints" => "pegadas",
    "hunters" => "caçadores",
    "indigenous" => "indígena",
    "tribes" => "tribos",
    "generation" => "geração",
    "threaten" => "ameaçar",
    "respect" => "respeitar",
    "nature" => "natureza",
    "illegal" => "ilegal",
    "loggers" => "madeireiros",
    "chainsaws" => "motosserras",
    "valuable" => "valioso",
    "compasses" => "bússolas",
    "wildly" => "descontroladamente",
    "directions" => "direções",
    "paths" => "caminhos",
    "disappeared" => "desapareceram",
    "overnight" => "durante a noite",
    "clearings" => "clareiras",
    "innocently" => "inocentemente",
    "exhausted" => "exaustos",
    "frightened" => "assustados",
    "revealed" => "revelou",
    "identity" => "identidade",
    "guardian" => "guardião",
    "destroy" => "destruir",
    "civilization" => "civilização",
    "protectors" => "protetores",
    // Boto
    "festival" => "festival",
    "celebrate" => "celebrar",
    "gifts" => "presentes",
    "charming" => "encantador",
    "elegant" => "elegante",
    "stylish" => "elegante",
    "recognized" => "reconheceu",
    "stranger" => "estranho",
    "approached" => "se aproximou",
    "movements" => "movimentos",
    "fluid" => "fluido",
    "floating" => "flutuando",
    "dawn" => "amanhecer",
    "disappear" => "desaparecer",
    "mist" => "névoa",
    "promised" => "prometeu",
    "removed" => "removeu",
    "determination" => "determinação",
    "truth" => "verdade",
    "closely" => "de perto",
    "moonlight" => "luar",
    "glow" => "brilho",
    "whistling" => "assobiando",
    "prepared" => "se preparou",
    "followed" => "seguiu",
    "quietly" => "silenciosamente",
    "amazement" => "espanto",
    "waist" => "cintura",
    "transform" => "transformar",
    "dissolved" => "se dissolveu",
    "flippers" => "nadadeiras",
    "blowhole" => "respiradouro",
    "dolphin" => "golfinho",
    "sensed" => "percebeu",
    "presence" => "presença",
    "intelligent" => "inteligente",
    "gentle" => "gentil",
    "shallow" => "raso",
    "touched" => "tocou",
    "goodbye" => "adeus",
    // 通用
    "heart" => "coração",
    "lives" => "vive",
    "appears" => "aparece",
    "bright" => "brilhante",
    "hair" => "cabelo",
    "point" => "apontar",
    "curious" => "curioso",
    "feature" => "característica",
    "serve" => "servir",
    "purpose" => "propósito",
    "track" => "rastrear",
    "follow" => "seguir",
    "wrong" => "errado",
    "direction" => "direção",
    "getting" => "ficando",
    "lost" => "perdido",
    "deeper" => "mais fundo",
    "instead" => "ao invés de",
    "finding" => "encontrando",
    "passed" => "passaram",
    "down" => "para baixo",
    "stories" => "histórias",
    "leading" => "conduzindo",
    "astray" => "desviado",
    "until" => "até",
    "promise" => "prometer",
    "group" => "grupo",
    "entered" => "entrou",
    "sacred" => "sagrado",
    "trucks" => "caminhões",
    "planned" => "planejaram",
    "oldest" => "mais velhas",
    "trees" => "árvores",
    "sell" => "vender",
    "wood" => "madeira",
    "watching" => "observando",
    "started" => "começaram",
    "work" => "trabalho",
    "strange" => "estranho",
    "things" => "coisas",
    "began" => "começaram",
    "happen" => "acontecer",
    "spinning" => "girando",
    "pointing" => "apontando",
    "marked" => "marcaram",
    "heard" => "ouviram",
    "sound" => "som",
    "coming" => "vindo",
    "empty" => "vazias",
    "appeared" => "apareceu",
    "small" => "pequeno",
    "seeming" => "parecendo",
    "help" => "ajudar",
    "find" => "encontrar",
    "home" => "casa",
    "asked" => "perguntou",
    "thinking" => "pensando",
    "could" => "poderiam",
    "easily" => "facilmente",
    "continue" => "continuar",
    "agreed" => "concordaram",
    "guide" => "guiar",
};

static DEFAULT_STOP_WORDS: phf::Set<&'static str> = phf_set! {
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "day", "get", "has", "him", "his", "how", "its", "may", "new", "now", "old",
    "see", "two", "way", "who", "boy", "did", "she", "use", "said", "each", "make",
    "most", "over", "such", "very", "what", "with", "have", "from", "they", "know", "want", "been",
    "good", "much", "some", "time", "well", "were",
};

/// 可注入的词表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    glossary: HashMap<String, String>,
    stop_words: HashSet<String>,
    max_entries: usize,
}

/// TOML 词表文件结构
///
/// ```toml
/// max_entries = 12
/// stop_words = ["the", "and"]
///
/// [glossary]
/// forest = "floresta"
/// ```
#[derive(Debug, Deserialize)]
struct LexiconFile {
    #[serde(default = "default_max_entries")]
    max_entries: usize,
    #[serde(default)]
    stop_words: Vec<String>,
    #[serde(default)]
    glossary: HashMap<String, String>,
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            glossary: DEFAULT_GLOSSARY
                .entries()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl Lexicon {
    /// 用自定义表构造；键统一转为小写
    pub fn new<G, S>(glossary: G, stop_words: S, max_entries: usize) -> Self
    where
        G: IntoIterator<Item = (String, String)>,
        S: IntoIterator<Item = String>,
    {
        Self {
            glossary: glossary
                .into_iter()
                .map(|(k, v)| (k.trim().to_lowercase(), v))
                .collect(),
            stop_words: stop_words
                .into_iter()
                .map(|w| w.trim().to_lowercase())
                .collect(),
            max_entries,
        }
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// 查询译文（参数应为小写）
    pub fn translate(&self, word: &str) -> Option<&str> {
        self.glossary.get(word).map(String::as_str)
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn len(&self) -> usize {
        self.glossary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glossary.is_empty()
    }

    /// 从 TOML 文本解析词表
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let file: LexiconFile = toml::from_str(content)?;
        Ok(Self::new(file.glossary, file.stop_words, file.max_entries))
    }

    /// 从 TOML 文件加载词表
    pub async fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| LexiconError::ReadFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;

        let lexicon = Self::from_toml_str(&content).map_err(|e| LexiconError::Invalid {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        tracing::info!(
            "✓ 已加载词表 {}: {} 个词条, {} 个停用词",
            path.display(),
            lexicon.len(),
            lexicon.stop_words.len()
        );
        Ok(lexicon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.translate("forest"), Some("floresta"));
        assert_eq!(lexicon.translate("backward"), Some("para trás"));
        assert!(lexicon.is_stop_word("the"));
        assert!(!lexicon.is_stop_word("forest"));
        assert_eq!(lexicon.max_entries(), DEFAULT_MAX_ENTRIES);
    }

    #[test]
    fn test_from_toml_str_normalizes_keys() {
        let lexicon = Lexicon::from_toml_str(
            r#"
            max_entries = 3
            stop_words = ["The"]

            [glossary]
            "Río" = "river"
            bosque = "forest"
            "#,
        )
        .unwrap();

        assert_eq!(lexicon.max_entries(), 3);
        assert_eq!(lexicon.translate("río"), Some("river"));
        assert!(lexicon.is_stop_word("the"));
        assert_eq!(lexicon.len(), 2);
    }

    #[test]
    fn test_from_toml_str_defaults() {
        let lexicon = Lexicon::from_toml_str("").unwrap();
        assert!(lexicon.is_empty());
        assert_eq!(lexicon.max_entries(), DEFAULT_MAX_ENTRIES);
    }

    #[tokio::test]
    async fn test_from_toml_file_missing() {
        let err = Lexicon::from_toml_file(Path::new("/nonexistent/lexicon.toml"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("lexicon.toml"));
    }
}
