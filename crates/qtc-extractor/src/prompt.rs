//! Prompt construction for schema-constrained extraction

/// Builds the extraction prompt for one context
pub struct PromptBuilder<'a> {
    context: &'a str,
    schema: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(context: &'a str, schema: &'a str) -> Self {
        Self { context, schema }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(
            ROLE.len() + RULEBOOK.len() + TASK_REMINDER.len() + self.schema.len() + self.context.len() + 256,
        );

        // 1. Role and output contract
        prompt.push_str(ROLE);
        prompt.push_str("\n\n<JSON_SCHEMA>\n");
        prompt.push_str(self.schema);
        prompt.push_str("\n</JSON_SCHEMA>\n\n");

        // 2. Field rules
        prompt.push_str(RULEBOOK);
        prompt.push_str("\n\n");

        // 3. The text to analyze
        prompt.push_str("EMAIL CONTEXT TO ANALYZE (email body and the text of every attachment):\n\n<CONTEXT>\n");
        prompt.push_str(self.context);
        prompt.push_str("\n</CONTEXT>\n\n");

        // 4. Output format reminder
        prompt.push_str(TASK_REMINDER);

        prompt
    }
}

const ROLE: &str = r#"You are a logistics data extraction agent. Read an unstructured freight quote
request and extract the fields needed for a Quote-to-Customer (QTC) form.

Your answer MUST be a single JSON object that conforms to this JSON Schema:"#;

const RULEBOOK: &str = r#"EXTRACTION RULES. Apply each rule exactly.

1. inquiry_type:
   - "budgeting", "costing purpose" or "estimation" anywhere in the text -> "Budgetary".
   - Otherwise "Bid to win".

2. client_name:
   - The customer's company name, from the signature or the body.
   - Use the full legal name as written (e.g. "ATIQ AL DHAHERI & CO LLC").

3. product:
   - "ocean", "sea", "vessel", "FCL", "LCL" -> "Ocean"
   - "air", "airfreight", "flight" -> "Air"
   - "road", "truck", "land transport" -> "Road"
   - "custom clearance", "customs", "brokerage" -> "Brokerage"
   - Container sizes such as "20ft" or "40HC" mean "Ocean" even without any of the words above.

4. incoterms:
   - An explicit code wins: "EXW", "FOB", "FCA", "DAP", "DDP", "CFR", "CIF".
   - Without one, port-to-port wording (e.g. "Shanghai to Jebel Ali") means "FOB".
   - When still unclear use "FOB".

5. ocean_type (only when product is "Ocean"):
   - Container units (1x20GP, 2x40HC) -> "FCL"
   - Pallets or packages with dimensions or weight (1 pallet, 300kg) -> "LCL"
   - Vehicles or cars -> "RORO"
   - Machinery or bulk cargo -> "Break Bulk"

6. containers (only when ocean_type is "FCL"):
   - Read patterns such as "2x20ft" or "1 x 40HC".
   - One entry per container type, with a short type code:
     [{"container_type": "20GP", "quantity": 2}, {"container_type": "40HC", "quantity": 1}]

7. port_of_loading and port_of_discharge:
   - Origin and destination port or city.
   - Use the standard name (e.g. "Jebel Ali", not "JAFZA").

8. commodity (MANDATORY):
   - The goods being shipped, e.g. "Electronics", "Textiles", "General Cargo".
   - If it is not explicitly stated, the value MUST be "NOT_FOUND_HIL". Never guess.

9. freetime_requirement (MANDATORY):
   - Free days requested, from phrases like "14 free days" or "21 days free time", as an integer.
   - If it is not explicitly stated, the value MUST be "NOT_FOUND_HIL". Never guess.

10. dangerous_goods:
   - false unless the text mentions "DG", "hazardous" or "IMDG", or refers to an MSDS attachment; then true."#;

const TASK_REMINDER: &str = r#"TASK:
Analyze the <CONTEXT> with the EXTRACTION RULES and return ONLY the JSON object described by
<JSON_SCHEMA>. No markdown code blocks, greetings or explanations.
The mandatory fields commodity and freetime_requirement must always be present; when
not found their value is "NOT_FOUND_HIL"."#;
