//! Fixed instructional prompts sent to the completion provider.

/// Instruction appended after the preceding-page context when narrating a
/// page image.
pub const LECTURE_NARRATION_PROMPT: &str = "
You are a professor, describe and explain this lecture slide, no fluff, buzzwords or jargon. \
Use the context (previous slides) provided to give a clear and concise explanation of this current slide.
Do not start the explanation with 'this slide', 'the slide', 'the title', 'the presentation', \
'Today's lecture' or statements like those, just start explaining the slide.
Don't make up information, only use the information provided in the slide and expand if necessary \
for clarity and understanding. Make the transitions between slides smooth and coherent as if you \
were giving a lecture. Do not use the words 'delve' or 'slide'. Start the explanation as if you were \
continuing from the previous slide. Bold the keywords and key phrases in your explanation.
";

/// System prompt for free-text questions.
pub const SEARCH_SYSTEM_PROMPT: &str = "You are a helpful assistant that can answer questions. \
If you don't know the answer, you can say 'I don't know'. Or if you don't have all the information, \
just tell me what you can.";

/// Builds the quiz request for `count` evaluate-level questions over `content`.
pub fn quiz_prompt(count: usize, content: &str) -> String {
    format!(
        r#"You are a professor. You MUST use Bloom's revised taxonomy to generate {count} quiz questions at level 5 (evaluate) for a university student who wants to review the main concepts of the learning objectives from the following content. Ensure the questions are relevant and based on the important topics of the slides, excluding any course administration or professor-related questions. Assume the student does not have access to the slides when completing the quiz. Each question should have 4 answer choices and specify the correct answer. Return the response as JSON only, nothing else. If there are existing questions, generate questions for other parts of the content. Make sure the answers are clear, 3-4 sentences long, and provide a rationale for the correct answer. Do not include any questions that are too similar to existing questions. Bloom's revised taxonomy level 5 (evaluate) requires students to make judgments based on criteria and standards.
example:
{{
    "quiz_questions": [
        {{
            "question": "Assess the effectiveness of France's approach to urban planning in reducing carbon emissions compared to Germany's strategies.",
            "answer_choices": [
                "France's approach is more effective due to its focus on public transportation.",
                "Germany's approach is more effective due to its emphasis on renewable energy.",
                "Both approaches are equally effective but in different areas.",
                "Neither approach has been effective in reducing carbon emissions."
            ],
            "answer": "France's approach is more effective due to its focus on public transportation.",
            "rationale": "France's investment in transit measurably reduced car usage."
        }}
    ]
}}
Content:
{content}
"#
    )
}

/// Builds the flashcard request over `content`.
pub fn flashcard_prompt(content: &str) -> String {
    format!(
        r#"You are a professor. Generate flashcards for university students to review the main concepts from the following content. Ensure the flashcards are relevant and based on the important topics of the slides, excluding any course administration or professor-related details. Assume the student does not have access to the slides when reviewing the flashcards. Each flashcard should have a question on one side and the corresponding answer on the other. Provide a rationale for the answer. If there are existing flashcards, cover other parts of the content. Return the response as JSON only, nothing else.
example:
{{
    "flashcards": [
        {{
            "question": "What is the impact of France's urban planning policies on carbon emissions?",
            "answer": "France's urban planning has significantly reduced emissions by promoting public transportation and reducing car usage.",
            "rationale": "Promoting public transportation led to a measurable decrease in car usage and emissions."
        }}
    ]
}}
Content:
{content}
"#
    )
}
