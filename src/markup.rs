//! HTML rendering of the note lists.
//!
//! Every piece of user-supplied text goes through [`escape_html`] before it
//! lands in markup.

use std::fmt::Write;

use crate::models::{Note, TrashedNote};
use crate::utils::format_timestamp;

pub const EMPTY_NOTES_MESSAGE: &str = "No notes saved yet.";
pub const EMPTY_TRASH_MESSAGE: &str = "Trash is empty.";

/// Escape the five HTML-significant characters
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape note text and turn line breaks into `<br>`
fn escape_text(text: &str) -> String {
    escape_html(text).replace("\r\n", "<br>").replace('\n', "<br>")
}

fn placeholder(message: &str) -> String {
    format!("<p class=\"notes-placeholder\">{}</p>", message)
}

/// Render the active notes, one card each, in list order
pub fn render_active(notes: &[Note], date_format: &str) -> String {
    if notes.is_empty() {
        return placeholder(EMPTY_NOTES_MESSAGE);
    }

    let mut html = String::new();
    for note in notes {
        let id = escape_html(&note.id);
        // Writing to a String cannot fail
        let _ = write!(
            html,
            concat!(
                "<div class=\"note-card\" data-id=\"{id}\">\n",
                "  <div class=\"note-card__head\">\n",
                "    <h3 class=\"note-card__title\">{title}</h3>\n",
                "    <button class=\"note-delete\" data-action=\"trash\" data-id=\"{id}\" type=\"button\" aria-label=\"Move note to trash\">&#x2715;</button>\n",
                "  </div>\n",
                "  <p class=\"note-card__text\">{text}</p>\n",
                "  <small class=\"note-card__meta\">{created}</small>\n",
                "</div>\n",
            ),
            id = id,
            title = escape_html(note.display_title()),
            text = escape_text(&note.text),
            created = escape_html(&format_timestamp(note.created_at, date_format)),
        );
    }
    html
}

/// Render the trash: an empty-trash control followed by one card per note
pub fn render_trash(trash: &[TrashedNote], date_format: &str) -> String {
    if trash.is_empty() {
        return placeholder(EMPTY_TRASH_MESSAGE);
    }

    let mut html = String::from(concat!(
        "<div class=\"trash-actions\">\n",
        "  <button data-action=\"empty-trash\" type=\"button\">Empty trash</button>\n",
        "</div>\n",
    ));
    for trashed in trash {
        let note = &trashed.note;
        let id = escape_html(&note.id);
        let _ = write!(
            html,
            concat!(
                "<div class=\"note-card\" data-id=\"{id}\">\n",
                "  <div class=\"note-card__head\">\n",
                "    <h3 class=\"note-card__title\">{title}</h3>\n",
                "    <div class=\"note-card__actions\">\n",
                "      <button data-action=\"restore\" data-id=\"{id}\" type=\"button\">Restore</button>\n",
                "      <button data-action=\"delete-forever\" data-id=\"{id}\" type=\"button\" aria-label=\"Delete forever\">Delete</button>\n",
                "    </div>\n",
                "  </div>\n",
                "  <p class=\"note-card__text\">{text}</p>\n",
                "  <small class=\"note-card__meta\">Created: {created} &middot; Deleted: {deleted}</small>\n",
                "</div>\n",
            ),
            id = id,
            title = escape_html(note.display_title()),
            text = escape_text(&note.text),
            created = escape_html(&format_timestamp(note.created_at, date_format)),
            deleted = escape_html(&format_timestamp(trashed.deleted_at, date_format)),
        );
    }
    html
}

/// Standalone HTML document holding both lists
pub fn render_page(notes: &[Note], trash: &[TrashedNote], date_format: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<title>noteblock</title>\n",
            "</head>\n",
            "<body>\n",
            "<section>\n<h2>Notes</h2>\n<div id=\"notes\">\n{notes}</div>\n</section>\n",
            "<section>\n<h2>Trash</h2>\n<div id=\"trashNotes\">\n{trash}</div>\n</section>\n",
            "</body>\n",
            "</html>\n",
        ),
        notes = render_active(notes, date_format),
        trash = render_trash(trash, date_format),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMAT: &str = "%Y-%m-%d %H:%M";

    fn note(id: &str, title: &str, text: &str) -> Note {
        Note::new(id.into(), title.into(), text.into(), 1_700_000_000_000)
    }

    #[test]
    fn escapes_all_five_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn script_title_is_rendered_inert() {
        let html = render_active(&[note("1", "<script>", "alert('x')")], FORMAT);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("alert(&#039;x&#039;)"));
    }

    #[test]
    fn empty_lists_render_placeholders() {
        assert!(render_active(&[], FORMAT).contains(EMPTY_NOTES_MESSAGE));
        assert!(render_trash(&[], FORMAT).contains(EMPTY_TRASH_MESSAGE));
        assert!(!render_trash(&[], FORMAT).contains("empty-trash"));
    }

    #[test]
    fn active_cards_follow_list_order_with_trash_control() {
        let html = render_active(&[note("b", "", "second"), note("a", "First", "one")], FORMAT);
        let b = html.find("data-id=\"b\"").unwrap();
        let a = html.find("data-id=\"a\"").unwrap();
        assert!(b < a);
        assert!(html.contains("Untitled"));
        assert_eq!(html.matches("data-action=\"trash\"").count(), 2);
    }

    #[test]
    fn text_line_breaks_become_br() {
        let html = render_active(&[note("1", "t", "line one\nline <two>\r\nthree")], FORMAT);
        assert!(html.contains("line one<br>line &lt;two&gt;<br>three"));
    }

    #[test]
    fn trash_cards_carry_restore_and_delete_controls() {
        let trashed = note("x\"y", "T", "body").into_trashed(1_700_000_100_000);
        let html = render_trash(&[trashed], FORMAT);
        assert_eq!(html.matches("data-action=\"empty-trash\"").count(), 1);
        assert!(html.contains("data-action=\"restore\" data-id=\"x&quot;y\""));
        assert!(html.contains("data-action=\"delete-forever\" data-id=\"x&quot;y\""));
        assert!(html.contains("Deleted:"));
    }

    #[test]
    fn unusable_date_format_still_renders_both_lists() {
        let trashed = note("t", "Gone", "bye").into_trashed(1_700_000_100_000);
        let active = render_active(&[note("1", "Kept", "hi")], "%Q");
        let trash = render_trash(&[trashed], "%Q");
        assert!(active.contains("Kept"));
        assert!(trash.contains("Gone"));
        assert!(!active.contains("Invalid Date"));
    }

    #[test]
    fn page_contains_both_containers() {
        let page = render_page(&[note("1", "A", "hello")], &[], FORMAT);
        assert!(page.contains("id=\"notes\""));
        assert!(page.contains("id=\"trashNotes\""));
        assert!(page.contains(EMPTY_TRASH_MESSAGE));
    }
}
