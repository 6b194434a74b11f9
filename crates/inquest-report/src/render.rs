//! Plain-text rendering — the clipboard-export flattening.
//!
//! The flattening is depth-first and section-ordered; every piece of
//! structural information in the document (section numbers, subsection
//! numbers, headings) survives into the text.

use crate::compose::{Block, Report, Section};

/// Render the whole report as plain text.
pub fn render_plain_text(report: &Report) -> String {
  let mut out = String::new();

  let title = report.title.to_uppercase();
  out.push_str(&title);
  out.push('\n');
  out.push_str(&"=".repeat(title.len()));
  out.push_str("\n\n");

  for section in &report.sections {
    render_section(&mut out, section);
    out.push('\n');
  }

  out.push_str(&format!(
    "{}  Generated {}\n",
    report.number,
    report.generated_at.format("%Y-%m-%d %H:%M UTC")
  ));

  out
}

fn render_section(out: &mut String, section: &Section) {
  let header = format!("{}. {}", section.number, section.title.to_uppercase());
  out.push_str(&header);
  out.push('\n');
  out.push_str(&"-".repeat(header.len()));
  out.push('\n');
  render_blocks(out, &section.blocks, 0);
}

fn render_blocks(out: &mut String, blocks: &[Block], depth: usize) {
  let indent = "  ".repeat(depth);
  for block in blocks {
    match block {
      Block::Banner(text) => {
        out.push_str(&format!("{indent}*** {text} ***\n"));
      }
      Block::Heading(text) => {
        out.push_str(&format!("{indent}{text}\n"));
      }
      Block::Paragraph(text) => {
        out.push_str(&format!("{indent}{text}\n"));
      }
      Block::KeyValues(pairs) => {
        for (key, value) in pairs {
          out.push_str(&format!("{indent}{key}: {value}\n"));
        }
      }
      Block::Items(lines) => {
        for line in lines {
          out.push_str(&format!("{indent}{line}\n"));
        }
      }
      Block::Subsection(sub) => {
        out.push('\n');
        out.push_str(&format!("{indent}{} {}\n", sub.number, sub.title));
        render_blocks(out, &sub.blocks, depth + 1);
      }
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::compose::Subsection;

  #[test]
  fn flattening_preserves_numbering_depth_first() {
    let report = Report {
      title:        "Incident Investigation Report".into(),
      number:       "INV-1".into(),
      generated_at: Utc::now(),
      sections:     vec![Section {
        number: 5,
        title:  "Causal Analysis".into(),
        blocks: vec![
          Block::Subsection(Subsection {
            number: "5.1".into(),
            title:  "First".into(),
            blocks: vec![Block::Paragraph("alpha".into())],
          }),
          Block::Subsection(Subsection {
            number: "5.2".into(),
            title:  "Second".into(),
            blocks: vec![],
          }),
        ],
      }],
    };

    let text = render_plain_text(&report);
    let pos_section = text.find("5. CAUSAL ANALYSIS").unwrap();
    let pos_first = text.find("5.1 First").unwrap();
    let pos_alpha = text.find("alpha").unwrap();
    let pos_second = text.find("5.2 Second").unwrap();
    assert!(pos_section < pos_first);
    assert!(pos_first < pos_alpha);
    assert!(pos_alpha < pos_second);
  }

  #[test]
  fn key_values_render_one_per_line() {
    let report = Report {
      title:        "Incident Investigation Report".into(),
      number:       "INV-1".into(),
      generated_at: Utc::now(),
      sections:     vec![Section {
        number: 1,
        title:  "Executive Summary".into(),
        blocks: vec![Block::KeyValues(vec![
          ("Evidence items".into(), "0".into()),
          ("Interviews".into(), "0".into()),
        ])],
      }],
    };

    let text = render_plain_text(&report);
    assert!(text.contains("Evidence items: 0\n"), "got:\n{text}");
    assert!(text.contains("Interviews: 0\n"), "got:\n{text}");
  }
}
