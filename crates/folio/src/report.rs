use std::fmt::Write as _;

use folio_core::UpdateStatus;
use serde_json::json;

const NOTES_INDENT: &str = "  ";

pub fn render_text(status: &UpdateStatus) -> String {
    match status {
        UpdateStatus::UpToDate => "Folio is already up to date.\n".to_string(),
        UpdateStatus::Available(update) => {
            let mut out = format!(
                "Update available: {}\nPackage: {}\nDownload: {}\n",
                update.version, update.name, update.download_url
            );
            let notes = update.notes.trim();
            if !notes.is_empty() {
                out.push_str("\nRelease notes:\n");
                for line in notes.lines() {
                    let _ = writeln!(out, "{NOTES_INDENT}{}", line.trim_end());
                }
            }
            out
        }
    }
}

pub fn render_json(status: &UpdateStatus) -> Result<String, serde_json::Error> {
    let value = match status {
        UpdateStatus::UpToDate => json!({ "status": "up_to_date" }),
        UpdateStatus::Available(update) => json!({ "status": "available", "update": update }),
    };
    serde_json::to_string_pretty(&value)
}

#[cfg(test)]
mod tests {
    use folio_core::{ReleaseVersion, UpdateInfo, UpdateStatus};
    use serde_json::json;

    use super::{render_json, render_text};

    fn available(notes: &str) -> UpdateStatus {
        UpdateStatus::Available(UpdateInfo {
            version: ReleaseVersion::parse("3.1").expect("version should parse"),
            notes: notes.to_string(),
            download_url: "https://example.invalid/folio_app_3.1.apk".to_string(),
            name: "folio_app_3.1.apk".to_string(),
        })
    }

    #[test]
    fn text_lists_update_and_indents_notes() {
        let text = render_text(&available("Faster paging\r\nNew fonts  \n"));

        assert!(text.starts_with("Update available: 3.1\n"));
        assert!(text.contains("Package: folio_app_3.1.apk\n"));
        assert!(text.contains("Download: https://example.invalid/folio_app_3.1.apk\n"));
        assert!(text.ends_with("Release notes:\n  Faster paging\n  New fonts\n"));
    }

    #[test]
    fn text_omits_empty_notes_section() {
        let text = render_text(&available("  "));
        assert!(!text.contains("Release notes"));
    }

    #[test]
    fn text_for_up_to_date_is_one_line() {
        assert_eq!(
            render_text(&UpdateStatus::UpToDate),
            "Folio is already up to date.\n"
        );
    }

    #[test]
    fn json_carries_status_and_update_fields() {
        let rendered = render_json(&available("notes")).expect("status should serialize");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid JSON");

        assert_eq!(
            value,
            json!({
                "status": "available",
                "update": {
                    "version": "3.1",
                    "notes": "notes",
                    "download_url": "https://example.invalid/folio_app_3.1.apk",
                    "name": "folio_app_3.1.apk",
                },
            })
        );

        let rendered = render_json(&UpdateStatus::UpToDate).expect("status should serialize");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid JSON");
        assert_eq!(value, json!({ "status": "up_to_date" }));
    }
}
