pub fn build_recognition_prompt(sentence: &str) -> String {
    format!(
        r#"Find the named entities in the following Greek sentence.

INSTRUCTIONS:
1. Identify places, organizations, people and dates
2. Copy each entity exactly as it is written in the sentence
3. Output ONLY valid JSON, nothing else
4. Use the exact schema below

SCHEMA:
{{
  "entities": [
    {{"text": "exact text from the sentence", "label": "LOC|GPE|ORG|PERSON|DATE"}}
  ]
}}

RULES:
- LOC: mountains, islands, rivers, regions, neighbourhoods
- GPE: countries, cities, towns, villages
- ORG: companies, record labels, bands not otherwise known, institutions
- PERSON: people
- DATE: years, dates, periods
- List entities in the order they appear
- If there are no entities, output {{"entities": []}}
- Output ONLY the JSON object, no markdown, no explanations

SENTENCE:
{}

JSON OUTPUT:"#,
        sentence
    )
}

pub fn build_retry_prompt(invalid_json: &str) -> String {
    format!(
        r#"The following JSON is invalid:

{}

Fix this JSON. Output only valid JSON with no markdown formatting, no code blocks, no explanations. Just the raw JSON object."#,
        invalid_json
    )
}
