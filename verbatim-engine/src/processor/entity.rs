//! Entity-categorized cut of bitext records

use super::RecordProcessor;
use crate::config::EngineConfig;
use crate::record::{join_columns, Record};
use crate::summary::RunSummary;
use std::fmt;
use std::sync::Arc;
use verbatim_core::{
    tag_and_project, EntityRecognizer, Encoding, TagProjector, Templater, TokenTagger,
};

/// Side of `SRC\tTGT` given to the entity recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaggedSide {
    /// Tag the source, project onto the target
    Source,
    /// Tag the target, project onto the source
    #[default]
    Target,
}

/// Tags one side with an [`EntityRecognizer`], projects the tags across and
/// cuts the projected side into typed placeholders.
///
/// The tagged side receives the same placeholders by token identity. Output is
/// always `SRC_CUT\tTGT_CUT\tJSON`, whichever side was tagged.
pub struct EntityCutProcessor {
    recognizer: Arc<dyn EntityRecognizer>,
    fallback_tagger: Option<Arc<dyn TokenTagger>>,
    side: TaggedSide,
    outside: String,
    fallback_tag: String,
    templater: Templater,
}

impl fmt::Debug for EntityCutProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityCutProcessor")
            .field("side", &self.side)
            .field("outside", &self.outside)
            .field("fallback_tag", &self.fallback_tag)
            .field("fallback_tagger", &self.fallback_tagger.is_some())
            .field("templater", &self.templater)
            .finish()
    }
}

impl EntityCutProcessor {
    /// Typed output is used regardless of the configured side channel format
    pub fn new(config: &EngineConfig, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self {
            recognizer,
            fallback_tagger: None,
            side: TaggedSide::default(),
            outside: config.outside_tag.clone(),
            fallback_tag: config.fallback_tag.clone(),
            templater: Templater::new(Encoding::Typed, config.outside_tag.as_str())
                .with_max_phrases(config.max_phrases),
        }
    }

    /// Choose which side the recognizer sees
    pub fn with_side(mut self, side: TaggedSide) -> Self {
        self.side = side;
        self
    }

    /// Ask `tagger` for the category of common tokens the recognizer left outside
    pub fn with_fallback_tagger(mut self, tagger: Arc<dyn TokenTagger>) -> Self {
        self.fallback_tagger = Some(tagger);
        self
    }
}

impl RecordProcessor for EntityCutProcessor {
    fn name(&self) -> &'static str {
        "ner-cut"
    }

    fn columns(&self) -> &'static [usize] {
        &[2]
    }

    fn process(
        &self,
        record: &Record<'_>,
        summary: &mut RunSummary,
    ) -> verbatim_core::Result<Vec<String>> {
        let (source, target) = (record.tokens(0), record.tokens(1));
        let (tagged, projected) = match self.side {
            TaggedSide::Source => (&source, &target),
            TaggedSide::Target => (&target, &source),
        };

        let mut projector = TagProjector::new(self.outside.as_str(), self.fallback_tag.as_str());
        if let Some(tagger) = &self.fallback_tagger {
            projector = projector.with_fallback_tagger(tagger.as_ref());
        }
        let tags = tag_and_project(self.recognizer.as_ref(), tagged, projected, &projector)?;

        let cut = self.templater.cut(projected, &tags.to_tags)?;
        summary.phrases_over_limit += cut.over_limit;
        let tagged_cut = cut.project_onto(tagged).join(" ");
        let projected_cut = cut.tokens.join(" ");
        let side_channel = cut.side_channel.encode()?;

        let line = match self.side {
            TaggedSide::Source => join_columns([tagged_cut, projected_cut, side_channel]),
            TaggedSide::Target => join_columns([projected_cut, tagged_cut, side_channel]),
        };
        Ok(vec![line])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verbatim_core::RegexTagger;

    fn run(processor: &EntityCutProcessor, line: &str) -> Vec<String> {
        let record = Record::parse(1, line, processor.columns()).unwrap();
        processor.process(&record, &mut RunSummary::default()).unwrap()
    }

    fn processor() -> EntityCutProcessor {
        EntityCutProcessor::new(&EngineConfig::default(), Arc::new(RegexTagger::default()))
    }

    #[test]
    fn test_target_tagged_by_default() {
        let out = run(&processor(), "Call Ana at 555\tLlama a Ana al 555");
        assert_eq!(
            out,
            vec!["Call DNT_MISC_1 at DNT_NUMBER_1\tLlama a DNT_MISC_1 al DNT_NUMBER_1\t{\"MISC\":[\"Ana\"],\"NUMBER\":[\"555\"]}"]
        );
    }

    #[test]
    fn test_swap_tags_source() {
        let processor = processor().with_side(TaggedSide::Source);
        let out = run(&processor, "write to @alice now\tescribe a @alice ya");
        assert_eq!(
            out,
            vec!["write to DNT_HANDLE_1 now\tescribe a DNT_HANDLE_1 ya\t{\"HANDLE\":[\"@alice\"]}"]
        );
    }

    #[test]
    fn test_fallback_tagger_consulted() {
        struct Names;

        impl TokenTagger for Names {
            fn tag_token(&self, token: &str, default: &str) -> String {
                if token == "Ana" {
                    "PERSON".to_string()
                } else {
                    default.to_string()
                }
            }
        }

        let processor = processor().with_fallback_tagger(Arc::new(Names));
        let out = run(&processor, "Call Ana\tLlama a Ana");
        assert_eq!(out, vec!["Call DNT_PERSON_1\tLlama a DNT_PERSON_1\t{\"PERSON\":[\"Ana\"]}"]);
    }

    #[test]
    fn test_nothing_shared() {
        let out = run(&processor(), "hello\thola");
        assert_eq!(out, vec!["hello\thola\t{}"]);
    }
}
