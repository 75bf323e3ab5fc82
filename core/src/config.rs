use rust_stemmers::Algorithm;
use serde::{Deserialize, Serialize};

/// English stopword list as distributed with NLTK.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i","me","my","myself","we","our","ours","ourselves","you","you're","you've","you'll","you'd","your","yours","yourself","yourselves",
    "he","him","his","himself","she","she's","her","hers","herself","it","it's","its","itself",
    "they","them","their","theirs","themselves","what","which","who","whom","this","that","that'll","these","those",
    "am","is","are","was","were","be","been","being","have","has","had","having","do","does","did","doing",
    "a","an","the","and","but","if","or","because","as","until","while","of","at","by","for","with","about","against",
    "between","into","through","during","before","after","above","below","to","from","up","down","in","out","on","off",
    "over","under","again","further","then","once","here","there","when","where","why","how","all","any","both","each",
    "few","more","most","other","some","such","no","nor","not","only","own","same","so","than","too","very",
    "s","t","can","will","just","don","don't","should","should've","now","d","ll","m","o","re","ve","y",
    "ain","aren","aren't","couldn","couldn't","didn","didn't","doesn","doesn't","hadn","hadn't","hasn","hasn't",
    "haven","haven't","isn","isn't","ma","mightn","mightn't","mustn","mustn't","needn","needn't","shan","shan't",
    "shouldn","shouldn't","wasn","wasn't","weren","weren't","won","won't","wouldn","wouldn't",
];

/// Snowball stemmer language used by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StemmerLanguage {
    #[default]
    English,
    French,
    German,
    Italian,
    Portuguese,
    Spanish,
}

impl StemmerLanguage {
    pub fn algorithm(self) -> Algorithm {
        match self {
            StemmerLanguage::English => Algorithm::English,
            StemmerLanguage::French => Algorithm::French,
            StemmerLanguage::German => Algorithm::German,
            StemmerLanguage::Italian => Algorithm::Italian,
            StemmerLanguage::Portuguese => Algorithm::Portuguese,
            StemmerLanguage::Spanish => Algorithm::Spanish,
        }
    }
}

/// Everything that determines how text becomes terms.
///
/// Two tokenizers built from equal configs produce identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    pub stemmer: StemmerLanguage,
    /// Compared against lowercased, stripped tokens.
    pub stopwords: Vec<String>,
    /// Apply NFKC before lowercasing, e.g. to fold fullwidth "ＣＯＶＩＤ" into "COVID".
    pub unicode_nfkc: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            stemmer: StemmerLanguage::English,
            stopwords: ENGLISH_STOPWORDS.iter().map(|w| w.to_string()).collect(),
            unicode_nfkc: false,
        }
    }
}

/// Which documents `rank` scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankScope {
    /// Every document of the collection is returned exactly once.
    #[default]
    Collection,
    /// Only documents containing every query term are returned.
    Conjunctive,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    pub scope: RankScope,
    /// Keep only the first `limit` results after sorting.
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tokenizer: TokenizerConfig,
    pub rank: RankConfig,
}
