//! `rtconfig.txt` transport layout patcher.
//!
//! rtconfig is the line-oriented `set key  verb  args` file describing
//! transport bar geometry. The rules here rewrite button rectangles and bar
//! heights for the larger DarkMinimal transport. Like the color patcher,
//! rewritten lines still match their own rule, so a second run is a no-op.

use anyhow::{Context, Result};
use regex::Regex;

use crate::config::BuildPaths;

/// Transport bar geometry applied to rtconfig.txt.
#[derive(Debug, Clone, Copy)]
pub struct TransportLayout {
    pub transport_height: u32,
    pub button_width: u32,
    pub button_height: u32,
    pub button_spacing: u32,
    pub status_width: u32,
    pub section_width: u32,
}

impl Default for TransportLayout {
    /// DarkMinimal defaults: 48px bar with 48x42 buttons (stock theme
    /// ships 36px bar and 28-32px buttons).
    fn default() -> Self {
        Self {
            transport_height: 48,
            button_width: 48,
            button_height: 42,
            button_spacing: 4,
            status_width: 350,
            section_width: 400,
        }
    }
}

impl TransportLayout {
    /// Build the named (pattern, replacement) rule set for this layout.
    fn rules(&self) -> Result<Vec<(&'static str, Regex, String)>> {
        let w = self.button_width;
        let h = self.button_height;
        let gap = self.button_spacing;

        let mut rules: Vec<(&'static str, String, String)> = vec![
            // rew is the leftmost button and keeps a zero x offset.
            (
                "trans.rew",
                r"(?m)^(set trans\.rew\s+.*Scale )\[0 0 \d+ \d+\]".into(),
                format!("${{1}}[0 0 {} {}]", w, h),
            ),
        ];

        for name in ["fwd", "rec", "play", "repeat", "stop", "pause"] {
            rules.push((
                "trans button",
                format!(r"(?m)^(set trans\.{}\s+.*Scale )\[-?\d+ 0 \d+ \d+\]", name),
                format!("${{1}}[{} 0 {} {}]", gap, w, h),
            ));
        }

        rules.push((
            "sectionButtons",
            r"(?m)^(set trans\.custom\.sectionButtons\s+\+ \* Scale )\[transMargin \d+ \d+ \d+\]"
                .into(),
            format!("${{1}}[transMargin 3 {} {}]", self.section_width, h),
        ));
        rules.push((
            "status width",
            r"(?m)^(define_parameter transStatusWidth\s+'Status Width' )\d+".into(),
            format!("${{1}}{}", self.status_width),
        ));
        rules.push((
            "trans.size",
            r"(?m)^(set trans\.size\s+\* Scale )\[1000 \d+\]".into(),
            format!("${{1}}[1000 {}]", self.transport_height),
        ));
        rules.push((
            "dockedheight",
            r"(?m)^(set trans\.size\.dockedheight\s+\* Scale )\[\d+\]".into(),
            format!("${{1}}[{}]", self.transport_height),
        ));

        rules
            .into_iter()
            .map(|(name, pattern, replacement)| {
                let re = Regex::new(&pattern).with_context(|| format!("rule {:?}", name))?;
                Ok((name, re, replacement))
            })
            .collect()
    }

    /// Apply all layout rules, returning the patched text and the total
    /// substitution count.
    pub fn apply(&self, content: &str) -> Result<(String, usize)> {
        let mut content = content.to_string();
        let mut changes = 0;

        for (_, re, replacement) in self.rules()? {
            let count = re.find_iter(&content).count();
            if count > 0 {
                content = re.replace_all(&content, replacement.as_str()).into_owned();
                changes += count;
            }
        }

        Ok((content, changes))
    }
}

/// Pipeline step: rewrite transport geometry in rtconfig.txt in place.
pub fn run(paths: &BuildPaths) -> Result<()> {
    let rtconfig_path = paths.rtconfig_file();
    let content = std::fs::read_to_string(&rtconfig_path)
        .with_context(|| format!("missing rtconfig: {}", rtconfig_path.display()))?;

    let layout = TransportLayout::default();
    let (content, changes) = layout.apply(&content)?;

    std::fs::write(&rtconfig_path, content)
        .with_context(|| format!("writing {}", rtconfig_path.display()))?;

    println!("Updated rtconfig.txt ({} substitutions)", changes);
    println!("  Transport height: {}px", layout.transport_height);
    println!("  Button size: {}x{}px", layout.button_width, layout.button_height);
    println!("  Button spacing: {}px", layout.button_spacing);
    println!("  Status width: {}px", layout.status_width);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
set trans.rew        + * Scale [0 0 28 30]
set trans.play       + * Scale [-2 0 32 30]
set trans.stop       + * Scale [2 0 28 30]
set trans.size       * Scale [1000 36]
set trans.size.dockedheight  * Scale [36]
set trans.custom.sectionButtons  + * Scale [transMargin 2 300 30]
define_parameter transStatusWidth  'Status Width' 450 200 600
set trans.unrelated  + * Scale [5 5 10 10]
";

    #[test]
    fn test_layout_rules_rewrite_geometry() {
        let layout = TransportLayout::default();
        let (out, changes) = layout.apply(SAMPLE).unwrap();

        assert_eq!(changes, 7);
        assert!(out.contains("set trans.rew        + * Scale [0 0 48 42]"));
        assert!(out.contains("set trans.play       + * Scale [4 0 48 42]"));
        assert!(out.contains("set trans.stop       + * Scale [4 0 48 42]"));
        assert!(out.contains("* Scale [1000 48]"));
        assert!(out.contains("dockedheight  * Scale [48]"));
        assert!(out.contains("'Status Width' 350 200 600"));
        // Lines outside the rule set are untouched.
        assert!(out.contains("set trans.unrelated  + * Scale [5 5 10 10]"));
        // sectionButtons sample uses the matching form.
        assert!(out.contains("[transMargin 3 400 42]"));
    }

    #[test]
    fn test_layout_is_idempotent() {
        let layout = TransportLayout::default();
        let (once, _) = layout.apply(SAMPLE).unwrap();
        let (twice, _) = layout.apply(&once).unwrap();
        assert_eq!(once, twice);
    }
}
