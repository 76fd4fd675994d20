// Keyword-based sentiment tagging of free-text answers
use crate::analyzer::report::SentimentCounts;
use crate::config::SentimentConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone)]
pub struct SentimentClassifier {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl SentimentClassifier {
    pub fn new(config: &SentimentConfig) -> Self {
        let lower = |words: &Vec<String>| words.iter().map(|w| w.to_lowercase()).collect();
        Self {
            positive: lower(&config.positive),
            negative: lower(&config.negative),
        }
    }

    /// Case-insensitive substring match. Texts hitting both lists, or neither, are neutral.
    pub fn classify(&self, text: &str) -> Sentiment {
        let text = text.to_lowercase();
        let has_positive = self.positive.iter().any(|k| text.contains(k.as_str()));
        let has_negative = self.negative.iter().any(|k| text.contains(k.as_str()));

        match (has_positive, has_negative) {
            (true, false) => Sentiment::Positive,
            (false, true) => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }

    /// `None` when there is no text at all.
    pub fn tally<'a, I>(&self, texts: I) -> Option<SentimentCounts>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = SentimentCounts::default();
        let mut seen = 0usize;
        for text in texts {
            seen += 1;
            match self.classify(text) {
                Sentiment::Positive => counts.positive += 1,
                Sentiment::Neutral => counts.neutral += 1,
                Sentiment::Negative => counts.negative += 1,
            }
        }
        (seen > 0).then_some(counts)
    }
}
