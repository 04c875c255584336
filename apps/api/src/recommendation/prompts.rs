// Prompt constants for the Recommendation module.

/// Recommendation prompt template.
/// Replace: {user_interest}, {catalog}
pub const RECOMMEND_PROMPT_TEMPLATE: &str = r#"
You are a smart book recommendation AI.
A user said: "{user_interest}"

Based on their interests, recommend the best 5 books from the following list. Format your reply as a list with title and author.

Books Available:
{catalog}
"#;

/// One catalog entry as shown to the model.
/// Replace: {title}, {authors}, {rating}, {description}
pub const BOOK_BLOCK_TEMPLATE: &str = "Title: {title}\nAuthor: {authors}\nRating: {rating}\nDescription: {description}\n";
