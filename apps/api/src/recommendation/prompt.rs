//! Prompt rendering and the recommendation call itself.

use tracing::debug;

use crate::catalog::{BookSummary, Catalog};
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::recommendation::prompts::{BOOK_BLOCK_TEMPLATE, RECOMMEND_PROMPT_TEMPLATE};

/// Renders one book as the four-line block the model sees.
pub fn render_book(book: &BookSummary) -> String {
    let rating = format!("{:?}", book.average_rating);
    fill_template(
        BOOK_BLOCK_TEMPLATE,
        &[
            ("title", book.title.as_str()),
            ("authors", book.authors.as_str()),
            ("rating", rating.as_str()),
            ("description", book.description.as_str()),
        ],
    )
}

/// Renders every book in catalog order, one blank line between blocks.
pub fn render_catalog(catalog: &Catalog) -> String {
    catalog
        .books()
        .iter()
        .map(render_book)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the full prompt for one request. Deterministic for a given catalog
/// and interest string.
pub fn build_prompt(user_interest: &str, catalog: &Catalog) -> String {
    let rendered = render_catalog(catalog);
    fill_template(
        RECOMMEND_PROMPT_TEMPLATE,
        &[("user_interest", user_interest), ("catalog", rendered.as_str())],
    )
}

/// Renders the prompt and asks the generator for recommendations.
/// The generated text is returned untouched.
pub async fn recommend(
    generator: &dyn TextGenerator,
    catalog: &Catalog,
    user_interest: &str,
) -> Result<String, AppError> {
    let prompt = build_prompt(user_interest, catalog);
    debug!(
        books = catalog.len(),
        prompt_bytes = prompt.len(),
        "Rendered recommendation prompt"
    );

    generator
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Recommendation failed: {e}")))
}

/// Replaces `{key}` placeholders in a single left-to-right pass.
/// Substituted values are never rescanned, so braces in user text or catalog
/// data come through literally. Unknown placeholders are left as written.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        let hit = values.iter().find_map(|(key, value)| {
            let matches = tail[1..].starts_with(key) && tail[1 + key.len()..].starts_with('}');
            matches.then_some((*value, key.len() + 2))
        });

        match hit {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn book(title: &str, authors: &str, rating: f64, description: &str) -> BookSummary {
        BookSummary {
            title: title.to_string(),
            authors: authors.to_string(),
            average_rating: rating,
            description: description.to_string(),
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            book(
                "The Silent Patient",
                "Alex Michaelides",
                4.08,
                "A psychotherapist obsessed with a silent patient.",
            ),
            book(
                "Dune",
                "Frank Herbert",
                4.0,
                "Politics and prophecy on a desert planet.",
            ),
        ])
    }

    struct RecordingGenerator {
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
        reply: Result<String, ()>,
    }

    impl RecordingGenerator {
        fn replying(text: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
                reply: Ok(text.to_string()),
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
                reply: Err(()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            self.reply.clone().map_err(|_| LlmError::Api {
                status: 429,
                message: "quota exceeded".to_string(),
            })
        }
    }

    #[test]
    fn test_render_book_block() {
        let rendered = render_book(&book("Dune", "Frank Herbert", 4.0, "Spice."));
        assert_eq!(
            rendered,
            "Title: Dune\nAuthor: Frank Herbert\nRating: 4.0\nDescription: Spice.\n"
        );
    }

    #[test]
    fn test_render_book_keeps_rating_precision() {
        let rendered = render_book(&book("T", "A", 3.57, "D"));
        assert!(rendered.contains("Rating: 3.57\n"));
    }

    #[test]
    fn test_render_catalog_separates_blocks_with_blank_line() {
        let rendered = render_catalog(&sample_catalog());
        let blocks: Vec<&str> = rendered.split("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("Title: The Silent Patient\n"));
        assert!(blocks[1].starts_with("Title: Dune\n"));
    }

    #[test]
    fn test_render_empty_catalog() {
        assert_eq!(render_catalog(&Catalog::default()), "");
    }

    #[test]
    fn test_prompt_contains_interest_and_titles() {
        let prompt = build_prompt("mystery novels", &sample_catalog());
        assert!(prompt.contains("mystery novels"));
        assert!(prompt.contains("The Silent Patient"));
        assert!(prompt.contains("A user said: \"mystery novels\""));
        assert!(prompt.contains("recommend the best 5 books from the following list"));
        assert!(prompt.contains("Format your reply as a list with title and author."));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let catalog = sample_catalog();
        let first = build_prompt("space opera", &catalog);
        let second = build_prompt("space opera", &catalog);
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_prompt_preserves_catalog_order() {
        let prompt = build_prompt("anything", &sample_catalog());
        let silent = prompt.find("The Silent Patient").unwrap();
        let dune = prompt.find("Title: Dune").unwrap();
        assert!(silent < dune);
    }

    #[test]
    fn test_placeholder_text_in_input_is_not_expanded() {
        let catalog = Catalog::new(vec![book("{user_interest}", "A", 4.0, "{rating}")]);
        let prompt = build_prompt("show me {catalog}", &catalog);

        assert!(prompt.contains("A user said: \"show me {catalog}\""));
        assert!(prompt.contains("Title: {user_interest}\n"));
        assert!(prompt.contains("Description: {rating}\n"));
        assert_eq!(prompt.matches("Books Available:").count(), 1);
    }

    #[test]
    fn test_fill_template_leaves_unknown_placeholders() {
        assert_eq!(
            fill_template("{a} and {b} and {", &[("a", "x")]),
            "x and {b} and {"
        );
    }

    #[tokio::test]
    async fn test_recommend_returns_generated_text_verbatim() {
        let generator = RecordingGenerator::replying("  1. Dune - Frank Herbert\n");
        let text = recommend(&generator, &sample_catalog(), "sci-fi")
            .await
            .unwrap();

        assert_eq!(text, "  1. Dune - Frank Herbert\n");
        let sent = generator.last_prompt.lock().unwrap().clone().unwrap();
        assert_eq!(sent, build_prompt("sci-fi", &sample_catalog()));
    }

    #[tokio::test]
    async fn test_recommend_calls_upstream_every_time() {
        let generator = RecordingGenerator::replying("ok");
        let catalog = sample_catalog();
        recommend(&generator, &catalog, "same").await.unwrap();
        recommend(&generator, &catalog, "same").await.unwrap();
        assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_recommend_surfaces_upstream_failure() {
        let generator = RecordingGenerator::failing();
        let err = recommend(&generator, &sample_catalog(), "x")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(msg) if msg.contains("quota exceeded")));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }
}
