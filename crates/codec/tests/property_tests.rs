use hufftable_codec::convert::{BASE10, BASE62, BINARY};
use hufftable_codec::{build_table, convert_base, Alphabet, Codec, DecodeStrategy};
use proptest::prelude::*;
use std::sync::Arc;

fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-e]{1,12}", 1..8)
}

proptest! {
    #[test]
    fn test_codes_are_prefix_free(corpus in corpus_strategy(), max_len in 0..5usize) {
        let table = build_table(&corpus, max_len).unwrap();
        prop_assert!(table.is_prefix_free());
    }

    #[test]
    fn test_roundtrip_bounded(
        mut corpus in corpus_strategy(),
        max_len in 1..5usize,
        text in "[a-e]{0,64}",
        compact in any::<bool>(),
    ) {
        // Every character of the text must be a token
        corpus.push("abcde".to_string());
        let codec = Codec::builder().max_token_length(max_len).build(&corpus).unwrap();

        let encoded = codec.encode(&text, compact).unwrap();
        prop_assert_eq!(codec.decode(&encoded, compact).unwrap(), text);
    }

    #[test]
    fn test_roundtrip_whole_words(
        words in prop::collection::vec("[a-e]{2,6}", 1..6),
        picks in prop::collection::vec(0..16usize, 0..20),
        compact in any::<bool>(),
    ) {
        // Single characters as fallback entries, as a whole-word corpus would
        let mut corpus: Vec<String> = "abcde".chars().map(String::from).collect();
        corpus.extend(words.iter().cloned());
        let codec = Codec::builder().max_token_length(0).build(&corpus).unwrap();

        let text: String = picks.iter().map(|&i| corpus[i % corpus.len()].as_str()).collect();
        let encoded = codec.encode(&text, compact).unwrap();
        prop_assert_eq!(codec.decode(&encoded, compact).unwrap(), text);
    }

    #[test]
    fn test_decode_strategies_agree(
        corpus in corpus_strategy(),
        max_len in 1..4usize,
        text in "[a-e]{1,32}",
    ) {
        let mut corpus = corpus;
        corpus.push("abcde".to_string());
        let table = Arc::new(build_table(&corpus, max_len).unwrap());

        let bucket = Codec::builder()
            .decode_strategy(DecodeStrategy::PrefixBucket)
            .with_table(table.clone());
        let by_length = Codec::builder()
            .decode_strategy(DecodeStrategy::CodeLength)
            .with_table(table);

        let encoded = bucket.encode(&text, false).unwrap();
        prop_assert_eq!(by_length.decode(&encoded, false).unwrap(), text.clone());
        prop_assert_eq!(bucket.decode(&encoded, false).unwrap(), text);
    }

    #[test]
    fn test_deterministic_build(corpus in corpus_strategy(), max_len in 0..4usize) {
        let first = build_table(&corpus, max_len).unwrap();
        let second = build_table(&corpus, max_len).unwrap();
        prop_assert_eq!(first.forward(), second.forward());
        prop_assert_eq!(first.reverse(), second.reverse());
    }

    #[test]
    fn test_base_roundtrip_binary(bits in "[01]{0,200}") {
        let binary = Alphabet::new(BINARY).unwrap();
        let base62 = Alphabet::new(BASE62).unwrap();

        let converted = convert_base(&bits, &binary, &base62).unwrap();
        prop_assert_eq!(convert_base(&converted, &base62, &binary).unwrap(), bits);
    }

    #[test]
    fn test_base_roundtrip_decimal(digits in "[0-9]{0,80}") {
        let decimal = Alphabet::new(BASE10).unwrap();
        let base65 = Alphabet::base65();

        let converted = convert_base(&digits, &decimal, &base65).unwrap();
        prop_assert_eq!(convert_base(&converted, &base65, &decimal).unwrap(), digits);
    }
}
