#![allow(missing_docs)]

use std::sync::Arc;

use pairtok::{
    CancellationToken,
    TokenId,
    Tokenizer,
    TokenizerOptions,
    Vocabulary,
    encoders::PairEncoder,
    training::VocabularyBuilder,
};
use tempdir::TempDir;

const SAMPLES: &[&str] = &[
    "hello world",
    "The quick brown fox jumps over the lazy dog.",
    "  multiple   spaces  ",
    "line1\nline2\r\nline3",
    "caf\u{00e9} na\u{00ef}ve \u{4f60}\u{597d}",
    "e\u{0301}\u{0302} combining marks",
    "emoji: \u{1f600}\u{1f680}\u{1f4a1}",
    "family: \u{1f468}\u{200d}\u{1f469}\u{200d}\u{1f467}\u{200d}\u{1f466}",
    "flags: \u{1f1fa}\u{1f1f8}\u{1f1ef}\u{1f1f5}",
    "skin tone: \u{1f44d}\u{1f3fd}",
    "math: \u{1d400}\u{1d401}\u{1d402}",
    "bidi: \u{05e9}\u{05dc}\u{05d5}\u{05dd} \u{0645}\u{0631}\u{062d}\u{0628}\u{0627} abc",
    "\u{202e}override\u{202c}",
    "zero\u{200b}width",
    "<|endoftext|>",
    "<|endoftext|> trailing",
    "\t\ttabs\tand\tspaces ",
    "a",
];

const CORPUS: &[&str] = &[
    "the quick brown fox jumps over the lazy dog",
    "the lazy dog sleeps while the quick fox runs",
    "hello world, hello tokenizer, hello merges",
    "na\u{00ef}ve caf\u{00e9} \u{1f600}\u{1f600} \u{1f600}",
];

fn trained_tokenizer(options: TokenizerOptions) -> Tokenizer {
    let tokenizer = Tokenizer::new(options).unwrap();
    tokenizer.train(CORPUS, 40).unwrap();
    tokenizer
}

#[test]
fn roundtrip_samples() {
    for options in [
        TokenizerOptions::default(),
        TokenizerOptions::default().with_parallelization_threshold(4),
        TokenizerOptions::default().with_caching(false),
    ] {
        let tokenizer = trained_tokenizer(options);
        for text in SAMPLES {
            let tokens = tokenizer.encode(text).unwrap();
            let decoded = tokenizer.decode(&tokens).unwrap();
            assert_eq!(&decoded, text, "roundtrip mismatch for {text:?}");

            let ids: Vec<TokenId> = tokens.iter().map(|t| t.id()).collect();
            assert_eq!(&tokenizer.decode_ids(&ids).unwrap(), text);
        }
    }
}

#[test]
fn grapheme_clusters_are_never_split() {
    let tokenizer = Tokenizer::new(TokenizerOptions::default()).unwrap();

    let family = "\u{1f468}\u{200d}\u{1f469}\u{200d}\u{1f467}\u{200d}\u{1f466}";
    let tokens = tokenizer.encode(family).unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].value(), family);

    let tokens = tokenizer.encode("e\u{0301}x").unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].value(), "e\u{0301}");
}

#[test]
fn special_tokens_take_precedence_over_merges() {
    let tokenizer = Tokenizer::new(TokenizerOptions::default()).unwrap();
    tokenizer
        .train(["<|endoftext|><|endoftext|><|endoftext|>"], 20)
        .unwrap();
    assert!(tokenizer.vocab().merge_rule_count() > 0);

    let tokens = tokenizer.encode("<|endoftext|>").unwrap();
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_special());
    assert_eq!(tokens[0].id(), 0);
}

#[test]
fn builder_vocabulary_drives_a_tokenizer() {
    let options = TokenizerOptions::default();
    let vocab = VocabularyBuilder::new(options.clone())
        .build_from_corpus(CORPUS, 30)
        .unwrap();
    let rules = vocab.merge_rule_count();
    assert!(rules > 0);

    let tokenizer = Tokenizer::with_vocabulary(options, vocab.clone()).unwrap();
    let text = "the quick dog";
    let tokens = tokenizer.encode(text).unwrap();
    assert!(tokens.len() < text.chars().count());
    assert_eq!(tokenizer.decode(&tokens).unwrap(), text);
    assert_eq!(vocab.merge_rule_count(), rules);
}

#[test]
fn persisted_vocabulary_decodes_saved_ids() {
    let dir = TempDir::new("pairtok_roundtrip").unwrap();
    let path = dir.path().join("vocab.json");

    let tokenizer = trained_tokenizer(TokenizerOptions::default());
    let encoded: Vec<Vec<TokenId>> = SAMPLES
        .iter()
        .map(|text| {
            tokenizer
                .encode(text)
                .unwrap()
                .iter()
                .map(|t| t.id())
                .collect()
        })
        .collect();
    tokenizer.save_vocabulary(&path).unwrap();

    let restored = Tokenizer::new(TokenizerOptions::default()).unwrap();
    restored.load_vocabulary(&path).unwrap();
    assert_eq!(restored.vocab().len(), tokenizer.vocab().len());
    assert_eq!(
        restored.vocab().to_token_map(),
        tokenizer.vocab().to_token_map()
    );

    for (text, ids) in SAMPLES.iter().zip(&encoded) {
        assert_eq!(&restored.decode_ids(ids).unwrap(), text);
    }
}

#[test]
fn concurrent_registration_assigns_unique_ids() {
    let vocab = Arc::new(Vocabulary::new());
    let encoder = PairEncoder::new(vocab.clone());

    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                for text in SAMPLES {
                    encoder.encode(text).unwrap();
                }
            });
        }
    });

    let map = vocab.to_token_map();
    let mut ids: Vec<TokenId> = map.values().copied().collect();
    ids.sort_unstable();
    let expected: Vec<TokenId> = (0..ids.len() as TokenId).collect();
    assert_eq!(ids, expected);
}

proptest::proptest! {
    #![proptest_config(proptest::prelude::ProptestConfig::with_cases(128))]

    #[test]
    fn roundtrip_arbitrary_text(text in "\\PC{0,200}") {
        let tokenizer = trained_tokenizer(
            TokenizerOptions::default().with_parallelization_threshold(16),
        );
        let tokens = tokenizer.encode(&text).unwrap();
        proptest::prop_assert_eq!(tokenizer.decode(&tokens).unwrap(), text);
    }

    #[test]
    fn learning_is_deterministic(
        corpus in proptest::collection::vec("[abc ]{0,16}", 0..6),
        num_merges in 0usize..12,
    ) {
        let learn = || {
            let encoder = PairEncoder::new(Arc::new(Vocabulary::new()));
            encoder.learn_merge_rules(&corpus, num_merges).unwrap()
        };

        let first = learn();
        let second = learn();
        proptest::prop_assert!(first.len() <= num_merges);
        proptest::prop_assert!(first.iter().all(|r| r.pair.frequency >= 2));
        proptest::prop_assert_eq!(first, second);
    }

    #[test]
    fn stream_progress_counts_every_token(
        items in proptest::collection::vec("\\PC{0,20}", 0..8),
    ) {
        let tokenizer = Tokenizer::new(TokenizerOptions::default()).unwrap();
        let mut last = 0;
        let progress = tokenizer
            .encode_stream(&items, &CancellationToken::new(), |tokens, progress| {
                last += tokens.len();
                assert_eq!(progress.processed_tokens, last);
            })
            .unwrap();
        proptest::prop_assert_eq!(progress.processed_tokens, last);
        proptest::prop_assert_eq!(progress.items, items.len());
    }
}
