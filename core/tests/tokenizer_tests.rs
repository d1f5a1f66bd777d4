use docsearch_core::tokenizer::{tokenize, Analyzer};

#[test]
fn it_normalizes_and_lowercases() {
    let words = tokenize("Ibuprofen NSAID! The ﬁrst café's menu.");
    assert!(words.contains(&"ibuprofen".to_string()));
    assert!(words.contains(&"nsaid".to_string()));
    // NFKC folds the "fi" ligature
    assert!(words.contains(&"first".to_string()));
    assert!(words.contains(&"café".to_string()));
}

#[test]
fn it_filters_stopwords() {
    let words = tokenize("The quick brown fox and the lazy dog isn't here");
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert!(!words.contains(&"isn".to_string()));
    assert!(!words.contains(&"t".to_string()));
    assert_eq!(words, vec!["quick", "brown", "fox", "lazy", "dog"]);
}

#[test]
fn all_stopwords_yield_nothing() {
    assert!(tokenize("the a of").is_empty());
    assert!(tokenize("").is_empty());
    assert!(tokenize("  --  ...").is_empty());
}

#[test]
fn stemming_is_opt_in() {
    assert_eq!(tokenize("medicines"), vec!["medicines"]);
    assert_eq!(Analyzer::new(true).analyze("medicines"), Analyzer::new(true).analyze("medicine"));
}
