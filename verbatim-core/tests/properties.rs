//! Property tests for the templating round trip, IOB tagging and the aligner

use proptest::prelude::*;
use verbatim_core::{
    dnt_flags, Encoding, GreedyAligner, Restorer, SideChannel, SpanTagger, Templater, OUTSIDE,
};

/// Letters, digits, punctuation and placeholder-shaped tokens.
/// `|` and `{` are left out: the flat encoding rejects them by contract.
fn word() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => r#"[a-zA-Z0-9_.,!?'"()\-]{1,6}"#,
        1 => "DNT_[0-9]",
        1 => "DNT_[A-Z]{1,4}_[0-9]",
    ]
}

/// Small alphabet so source and target share tokens often
fn overlapping_word() -> impl Strategy<Value = String> {
    "[abcAB]{1,2}"
}

fn tag() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["O", "O", "ORG", "PER", "B-DNT", "I-DNT", "B-", "I-"]).prop_map(String::from)
}

fn tagged_record() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    (1usize..20).prop_flat_map(|n| {
        (
            prop::collection::vec(word(), n),
            prop::collection::vec(tag(), n),
        )
    })
}

fn bitext() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    (
        prop::collection::vec(overlapping_word(), 0..12),
        prop::collection::vec(overlapping_word(), 0..12),
    )
}

proptest! {
    #[test]
    fn typed_cut_then_restore_is_identity((tokens, tags) in tagged_record()) {
        let cut = Templater::default().cut(&tokens, &tags).unwrap();
        let restored = Restorer::new(false).restore(&cut.tokens, &cut.side_channel).unwrap();
        prop_assert_eq!(restored.text, tokens.join(" "));
        prop_assert_eq!(restored.errors, 0);
    }

    #[test]
    fn flat_cut_then_restore_is_identity((tokens, tags) in tagged_record()) {
        let cut = Templater::new(Encoding::Flat, OUTSIDE).cut(&tokens, &tags).unwrap();
        let side = SideChannel::decode(&cut.side_channel.encode().unwrap()).unwrap();
        let restored = Restorer::new(false).restore(&cut.tokens, &side).unwrap();
        prop_assert_eq!(restored.text, tokens.join(" "));
    }

    #[test]
    fn iob_tags_are_well_formed((src, tgt) in bitext()) {
        let tags = SpanTagger::default().tag_pair(&src, &tgt).unwrap();
        prop_assert_eq!(tags.len(), src.len());
        for (i, t) in tags.iter().enumerate() {
            if t.starts_with("I-") {
                prop_assert!(i > 0 && tags[i - 1] != "O");
            }
        }
    }

    #[test]
    fn flags_ignore_source_case((src, tgt) in bitext()) {
        let upper: Vec<String> = src.iter().map(|t| t.to_uppercase()).collect();
        prop_assert_eq!(dnt_flags(&upper, &tgt), dnt_flags(&src, &tgt));
    }

    #[test]
    fn aligner_is_deterministic((src, tgt) in bitext()) {
        let aligner = GreedyAligner::default();
        let first = aligner.align(&src, &tgt).unwrap();
        let second = aligner.align(&src, &tgt).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn aligner_phrases_are_flagged_source_ngrams((src, tgt) in bitext()) {
        let alignment = GreedyAligner::default().align(&src, &tgt).unwrap();
        let flags = dnt_flags(&src, &tgt);
        let lower: Vec<String> = src.iter().map(|t| t.to_lowercase()).collect();
        for phrase in &alignment.phrases {
            let gram: Vec<String> = phrase.split(' ').map(|t| t.to_lowercase()).collect();
            let found = (0..=lower.len().saturating_sub(gram.len())).any(|start| {
                start + gram.len() <= lower.len()
                    && lower[start..start + gram.len()] == gram[..]
                    && flags[start..start + gram.len()].iter().all(|&f| f)
            });
            prop_assert!(found, "phrase {:?} is not a flagged source n-gram", phrase);
        }
    }

    #[test]
    fn aligned_target_restores_up_to_case((src, tgt) in bitext()) {
        let alignment = GreedyAligner::default().align(&src, &tgt).unwrap();
        let restored = Restorer::new(false)
            .restore(&alignment.target, &alignment.side_channel())
            .unwrap();
        prop_assert_eq!(restored.text.to_lowercase(), tgt.join(" ").to_lowercase());
    }
}
