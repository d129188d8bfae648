//! YAML output.
//!
//! Reports are serialized through `serde_yaml` into a value tree, then
//! emitted with `yaml-rust-davvid` so multi-line strings come out as
//! literal blocks.

use anyhow::{Context, Result};
use serde::Serialize;
use yaml_rust_davvid::yaml::Hash;
use yaml_rust_davvid::{Yaml, YamlEmitter};

/// Serializes `data` to a YAML document.
pub fn to_yaml<T: Serialize>(data: &T) -> Result<String> {
    let value = serde_yaml::to_value(data).context("Failed to serialize to YAML value")?;
    let document = to_emitter_tree(&value);

    let mut output = String::new();
    let mut emitter = YamlEmitter::new(&mut output);
    emitter.multiline_strings(true);
    emitter.dump(&document).context("Failed to emit YAML")?;

    Ok(output)
}

fn to_emitter_tree(value: &serde_yaml::Value) -> Yaml {
    match value {
        serde_yaml::Value::Null => Yaml::Null,
        serde_yaml::Value::Bool(b) => Yaml::Boolean(*b),
        serde_yaml::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Yaml::Integer(i),
            (None, Some(f)) => Yaml::Real(f.to_string()),
            (None, None) => Yaml::String(n.to_string()),
        },
        serde_yaml::Value::String(s) => Yaml::String(s.clone()),
        serde_yaml::Value::Sequence(items) => Yaml::Array(items.iter().map(to_emitter_tree).collect()),
        serde_yaml::Value::Mapping(map) => {
            let mut hash = Hash::new();
            for (k, v) in map {
                hash.insert(to_emitter_tree(k), to_emitter_tree(v));
            }
            Yaml::Hash(hash)
        }
        // Tags carry no meaning in reports
        serde_yaml::Value::Tagged(tagged) => to_emitter_tree(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{ContentAnalyzer, MrAnalysisRecord};

    #[test]
    fn emits_analysis_fields_in_declaration_order() -> anyhow::Result<()> {
        let record = ContentAnalyzer::new().analyze_with_mr_count(
            "# Release 2.0\n\n## New Features\n- Export to JSON\n\nReleased January 5, 2024.",
            "v2.0",
            4,
        );
        let yaml = to_yaml(&record)?;

        assert!(yaml.starts_with("---"));
        let title = yaml.find("title:").ok_or_else(|| anyhow::anyhow!("no title"))?;
        let mr_count = yaml.find("mr_count: 4").ok_or_else(|| anyhow::anyhow!("no mr_count"))?;
        assert!(title < mr_count);
        assert!(yaml.contains("release_type: Major Release"));
        assert!(yaml.contains("- JSON"));
        Ok(())
    }

    #[test]
    fn mr_record_uses_display_labels() -> anyhow::Result<()> {
        let record = ContentAnalyzer::new().analyze_mr("Fix a crash in the exporter");
        let parsed: MrAnalysisRecord = serde_yaml::from_str(&to_yaml(&record)?)?;
        assert_eq!(parsed, record);
        assert!(to_yaml(&record)?.contains("type: Bug Fix"));
        Ok(())
    }

    #[test]
    fn multiline_strings_become_blocks() -> anyhow::Result<()> {
        #[derive(Serialize)]
        struct Body {
            text: String,
        }
        let yaml = to_yaml(&Body {
            text: "line one\nline two".to_string(),
        })?;
        assert!(yaml.contains("text: |"));
        Ok(())
    }
}
