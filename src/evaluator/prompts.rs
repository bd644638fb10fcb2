//! Judge prompt templates.
//!
//! Placeholders are substituted with plain string replacement.

pub const CORRECTNESS_SYSTEM: &str = "\
You are an expert evaluation system for a question answering chatbot.

You are given the following information:
- a user query, and
- a generated answer

You may also be given a reference answer to use for reference in your evaluation.

Your job is to judge the relevance and correctness of the generated answer.
Output a single score that represents a holistic evaluation.
You must return your response in a line with only the score.
Do not return answers in any other format.
On a separate line provide your reasoning for the score as well.

Follow these guidelines for scoring:
- Your score has to be between 1 and 5, where 1 is the worst and 5 is the best.
- If the generated answer is not relevant to the user query, you should give a score of 1.
- If the generated answer is relevant but contains mistakes, you should give a score between 2 and 3.
- If the generated answer is relevant and fully correct, you should give a score between 4 and 5.
";

pub const CORRECTNESS_USER: &str = "\
## User Query
{query}

## Reference Answer
{reference_answer}

## Generated Answer
{generated_answer}
";

pub const NO_REFERENCE_ANSWER: &str = "(NO REFERENCE ANSWER SUPPLIED)";

pub const FAITHFULNESS_EVAL: &str = "\
Please tell if a given piece of information is supported by the context.
You need to answer with either YES or NO.
Answer YES if any of the context supports the information, even if most of the context is unrelated. Some examples are provided below.

Information: Apple pie is generally double-crusted.
Context: An apple pie is a fruit pie in which the principal filling ingredient is apples.
Apple pie is often served with whipped cream, ice cream ('apple pie a la mode'), custard or cheddar cheese.
It is generally double-crusted, with pastry both above and below the filling; the upper crust may be solid or latticed (woven of crosswise strips).
Answer: YES
Information: Apple pies tastes bad.
Context: An apple pie is a fruit pie in which the principal filling ingredient is apples.
Apple pie is often served with whipped cream, ice cream ('apple pie a la mode'), custard or cheddar cheese.
It is generally double-crusted, with pastry both above and below the filling; the upper crust may be solid or latticed (woven of crosswise strips).
Answer: NO
Information: {query_str}
Context: {context_str}
Answer: ";

pub const FAITHFULNESS_REFINE: &str = "\
We want to understand if the following information is present in the context information: {query_str}
We have provided an existing YES/NO answer: {existing_answer}
We have the opportunity to refine the existing answer (only if needed) with some more context below.
------------
{context_msg}
------------
If the existing answer was already YES, still answer YES. If the information is present in the new context, answer YES. Otherwise answer NO.
";

pub const RELEVANCY_EVAL: &str = "\
Your task is to evaluate if the response for the query is in line with the context information provided.
You have two options to answer. Either YES/ NO.
Answer - YES, if the response for the query is in line with context information otherwise NO.
Query and Response: 
 {query_str}
Context: 
 {context_str}
Answer: ";

pub const RELEVANCY_REFINE: &str = "\
We want to understand if the following query and response is in line with the context information: 
 {query_str}
We have provided an existing YES/NO answer: 
 {existing_answer}
We have the opportunity to refine the existing answer (only if needed) with some more context below.
------------
{context_msg}
------------
If the existing answer was already YES, still answer YES. If the information is present in the new context, answer YES. Otherwise answer NO.
";

pub const ANSWER_RELEVANCY_EVAL: &str = "\
Your task is to evaluate if the response is relevant to the query.
The evaluation should be performed in a step-by-step manner by answering the following questions:
1. Does the provided response match the subject matter of the user's query?
2. Does the provided response attempt to address the focus or perspective on the subject matter taken on by the user's query?
Each question above is worth 1 point. Provide detailed feedback on response according to the criteria questions above. After your feedback provide a final result by strictly following this format: '[RESULT] followed by the integer number representing the total score assigned to the response'

Query: 
 {query}
Response: 
 {response}
Feedback:";

/// Replaces each `{key}` in `template` with its value.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{key}}}"), value)
    })
}
