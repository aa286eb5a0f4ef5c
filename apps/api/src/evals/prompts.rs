// Prompt constants for the correctness judge.

/// Judge prompt template. Replace `{inputs}` and `{outputs}` before sending.
pub const CORRECTNESS_EVAL_PROMPT_TEMPLATE: &str = r#"You are an expert hiring-data reviewer grading the output of an automated CV scorer.

The scorer reads a CV and returns, for education and for experience, positive factors, negative factors, potential improvements, reasoning and a final score between 0 and 10. It must set valid=false with every other field null when the text is not a CV.

Grade how CORRECT the scorer output is for the given CV:
- The valid flag matches whether the text really is a CV.
- Every factor it cites is supported by the CV; nothing is invented.
- Important strengths or weaknesses in the CV are not missed.
- Each final score is consistent with its own reasoning and with the rubric: top-tier doctorates and long tenures at selective employers score high, little education or experience scores low, and scores above 9.5 are reserved for truly exceptional profiles.
- Education and experience are judged independently of each other.

Return a score between 0.0 (completely wrong) and 1.0 (fully correct) in steps of 0.1, together with a short reasoning that justifies it.

<input>
{inputs}
</input>

<output>
{outputs}
</output>
"#;

/// System prompt for the judge — enforces JSON-only output.
pub const CORRECTNESS_EVAL_SYSTEM: &str = "You are a strict, fair evaluator. \
    You MUST respond with a JSON object of the form {\"reasoning\": string, \"score\": number}. \
    Do NOT include any text outside the JSON object.";
