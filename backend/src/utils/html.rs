use ammonia::Builder;

/// Clean student-supplied text using the ammonia library.
///
/// The fields are plain text that ends up in JSON and feedback prompts, so
/// input without markup is kept verbatim (`IL-17 < TNF & JAK` stays as typed).
/// Input that does contain markup has every tag stripped, and the contents of
/// `<script>` and `<style>` are dropped entirely. The cleaned result is HTML
/// text, so `&` and `<` inside it come back entity-escaped.
///
/// Returns `None` for input that is empty after trimming or cleaning.
pub fn clean_text(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if !ammonia::is_html(trimmed) {
        return Some(trimmed.to_string());
    }

    let cleaned = Builder::empty().clean(trimmed).to_string();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
