//! Prompt templates for the suggestion services.
//!
//! Both prompts pin the reply shape (bullet list / comma list) so the parser
//! has something to latch onto, and explicitly forbid extra commentary.
//! Compliance is still advisory — the parsers degrade to empty results and
//! the workflow lets the user edit keyword output before it is used.

/// Build the category-suggestion prompt for a company description.
///
/// Asks for exactly `count` concrete business categories as a bullet list,
/// with a worked example of the expected shape and no extra explanation.
pub fn category_prompt(description: &str, count: usize) -> String {
    format!(
        "Based on the following description of a company, suggest {count} specific types of \
         businesses that would be ideal potential customers for it.\n\
         Your answer must be a clear, concise bullet list. Do not add extra explanations, \
         only the names of the business types.\n\n\
         Example response:\n\
         - Boutique clothing stores\n\
         - Specialty coffee shops\n\
         - Digital marketing agencies\n\
         - Gyms and yoga studios\n\
         - Physiotherapy clinics\n\n\
         Company description:\n\
         \"{description}\"\n\n\
         Potential business types:"
    )
}

/// Build the keyword-suggestion prompt for a chosen category.
///
/// Encodes three hard constraints: every term is exactly one word, no brand
/// or proper-name terms, and terms name a concept or product category rather
/// than an ultra-specific product. One worked correct-vs-incorrect example
/// illustrates all three.
pub fn keyword_prompt(category: &str, description: &str, range: (usize, usize)) -> String {
    let (min, max) = range;
    format!(
        "I sell to businesses of the type \"{category}\". My own company: \"{description}\".\n\
         Suggest {min} to {max} filter keywords I could use to find the most relevant \
         businesses of that type in a directory, based on what they mention in their \
         own descriptions.\n\n\
         Hard rules:\n\
         1. Every keyword is exactly ONE word.\n\
         2. No brand names or proper names of any kind.\n\
         3. Each keyword names a concept or product category, not an ultra-specific product.\n\n\
         Worked example for the category \"Pet shops\":\n\
         Correct: feed, grooming, aquariums, veterinary\n\
         Incorrect: Royal Canin (brand), dog food (two words), 15kg-puppy-kibble (too specific)\n\n\
         Reply with only the keywords, comma-separated, in lowercase, no other text:"
    )
}
