use crate::tokenizer::Analyzer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How inverse document frequency is derived from document frequency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdfScheme {
    /// ln((1 + n) / (1 + df)) + 1. Never zero, so terms found in every document still count.
    #[default]
    Smooth,
    /// ln(n / df). Zero for a term found in every document.
    Plain,
    /// ln(1 + n / df).
    SmoothPlain,
}

impl IdfScheme {
    pub fn idf(self, num_docs: u32, df: u32) -> f32 {
        let n = num_docs as f32;
        let df = df as f32;
        match self {
            IdfScheme::Smooth => ((1.0 + n) / (1.0 + df)).ln() + 1.0,
            IdfScheme::Plain => {
                if df == 0.0 { 0.0 } else { (n / df).ln() }
            }
            IdfScheme::SmoothPlain => {
                if df == 0.0 { 0.0 } else { (1.0 + n / df).ln() }
            }
        }
    }
}

impl FromStr for IdfScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smooth" => Ok(IdfScheme::Smooth),
            "plain" => Ok(IdfScheme::Plain),
            "smooth-plain" => Ok(IdfScheme::SmoothPlain),
            other => Err(format!("unknown idf scheme '{other}' (expected smooth, plain or smooth-plain)")),
        }
    }
}

impl fmt::Display for IdfScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdfScheme::Smooth => "smooth",
            IdfScheme::Plain => "plain",
            IdfScheme::SmoothPlain => "smooth-plain",
        };
        f.write_str(name)
    }
}

/// Analyzer and weighting options used to build a model. Queries are always
/// transformed with the options the model was built with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    #[serde(default)]
    pub analyzer: Analyzer,
    #[serde(default)]
    pub idf: IdfScheme,
    /// Use 1 + ln(tf) instead of the raw term count.
    #[serde(default)]
    pub sublinear_tf: bool,
}

impl VectorizerConfig {
    pub fn tf(&self, count: u32) -> f32 {
        if count == 0 {
            0.0
        } else if self.sublinear_tf {
            1.0 + (count as f32).ln()
        } else {
            count as f32
        }
    }
}
