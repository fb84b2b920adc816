// src/services/prompts.rs
//
// Prompt text sent to the feedback collaborator and the deterministic
// fallback text used when it is unavailable.

use std::fmt::Write;

use crate::{
    catalog::{
        CK12_AUTOIMMUNE, CK12_ENZYMES, FDA_DRUG_DEVELOPMENT, KHAN_ENZYME_INHIBITION, KHAN_IMMUNE,
        NIH_AUTOIMMUNE, SHORT_ANSWER_Q7, SHORT_ANSWER_Q8,
    },
    models::{
        design::{Labeled, TreatmentDesign},
        page::Link,
        quiz::ShortAnswers,
    },
};

const PERSONA: &str = "You are Professor Xavier, a pharmaceutical scientist and biology educator helping high school students understand drug development for autoimmune diseases.";

const NOT_PROVIDED: &str = "Not provided";

fn or_not_provided(text: &Option<String>) -> &str {
    text.as_deref().unwrap_or(NOT_PROVIDED)
}

fn resource_line(out: &mut String, n: usize, link: &Link, why: &str) {
    let _ = writeln!(out, "{}. [{}]({}) - {}", n, link.title, link.url, why);
}

pub fn design_prompt(design: &TreatmentDesign) -> String {
    let side_effects = if design.side_effects.is_empty() {
        "None listed".to_string()
    } else {
        design
            .side_effects
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let drug_type = design.drug_type.label();
    let target = design.target;

    format!(
        r#"{PERSONA}

A student has designed a treatment for an autoimmune disease. Provide detailed, educational feedback that teaches the biology behind their choices.

## Student's Treatment Design:
- **Treatment Name:** {name}
- **Target Disease:** {disease}
- **Molecular Target:** {target}
- **Drug Type:** {drug_type}
- **Mechanism Description:** {mechanism}
- **Route of Administration:** {delivery}
- **Efficacy vs Safety Priority:** {priority}
- **Expected Side Effects:** {side_effects}
- **Expected Cost:** {cost}
- **Dosing Frequency:** {dosing}
- **Scientific Rationale:** {rationale}

## Provide Feedback On:

### 1. TARGET EVALUATION
- Is this a good target for this disease? Explain the biology
- What role does this target play in the disease pathway?
- Are there existing drugs targeting this? How does the student's approach compare?

### 2. DRUG TYPE ASSESSMENT
- Is the chosen drug type appropriate for this target?
- Explain structure-function: How would a {drug_type} interact with {target}?
- What are the advantages and limitations of this drug type?

### 3. MECHANISM FEEDBACK
- Evaluate their mechanism description
- Fill in any gaps in their understanding
- Explain exactly how blocking {target} would affect the disease

### 4. PRACTICAL CONSIDERATIONS
- Comment on their delivery route choice
- Discuss the trade-offs they identified
- Are there considerations they missed?

### 5. HOMEWORK RESOURCES
Recommend 2-3 specific resources with URLs, for example:
- {khan_url} - {khan}
- {fda_url} - {fda}
- {nih_url} - {nih}

Be encouraging but scientifically accurate. Use specific molecular details where appropriate."#,
        name = design.name.as_deref().unwrap_or("Unnamed"),
        disease = design.disease.label(),
        mechanism = or_not_provided(&design.mechanism),
        delivery = design.delivery.label(),
        priority = design.efficacy_priority.label(),
        cost = design.cost.label(),
        dosing = design.dosing.label(),
        rationale = or_not_provided(&design.rationale),
        khan_url = KHAN_IMMUNE.url,
        khan = KHAN_IMMUNE.title,
        fda_url = FDA_DRUG_DEVELOPMENT.url,
        fda = FDA_DRUG_DEVELOPMENT.title,
        nih_url = NIH_AUTOIMMUNE.url,
        nih = NIH_AUTOIMMUNE.title,
    )
}

pub fn design_fallback(design: &TreatmentDesign) -> String {
    let target = design.target;
    let mut out = format!(
        "**Great work designing a treatment for {disease}!**\n\n\
         **Target Analysis:** {target} is a solid choice for this disease. It plays a key role in the inflammatory pathway.\n\n\
         **Drug Type:** Your choice of {drug_type} has specific advantages. Small molecules can be taken orally, while antibodies are highly specific but require injection.\n\n\
         **Mechanism:** Blocking {target} interrupts the signaling cascade that drives inflammation. This should reduce disease symptoms without completely suppressing the immune system.\n\n\
         **Consider:** How does your delivery method ({delivery}) affect patient compliance and drug effectiveness?\n\n\
         **Study These Resources:**\n",
        disease = design.disease.label(),
        drug_type = design.drug_type.label(),
        delivery = design.delivery.label(),
    );
    resource_line(&mut out, 1, &KHAN_IMMUNE, "Understand how immune cells communicate");
    resource_line(&mut out, 2, &FDA_DRUG_DEVELOPMENT, "Learn how drugs are approved");
    resource_line(&mut out, 3, &NIH_AUTOIMMUNE, "Deeper dive into autoimmunity");
    out
}

pub fn quiz_prompt(answers: &ShortAnswers, score: u32, total: u32) -> String {
    format!(
        r#"{PERSONA}

A student scored {score}/{total} on the multiple-choice part of the lesson quiz and wrote the short answers below. For each answer, say what is correct, fill in missing biology, and give a model answer. Be encouraging but scientifically accurate.

### Question 7
{SHORT_ANSWER_Q7}

**Student answer:** {q7}

### Question 8
{SHORT_ANSWER_Q8}

**Student answer:** {q8}

Finish with 1-2 study resources with URLs, for example {enzymes_url} or {fda_url}."#,
        q7 = or_not_provided(&answers.q7),
        q8 = or_not_provided(&answers.q8),
        enzymes_url = CK12_ENZYMES.url,
        fda_url = FDA_DRUG_DEVELOPMENT.url,
    )
}

/// Model answers for the two short-answer questions.
pub fn quiz_fallback() -> String {
    let mut out = String::from(
        "**Question 7 - Structure-Function & Drug Design:**\n\n\
         The key concept is that **protein structure determines function**. Scientists use X-ray crystallography to map the 3D structure of enzymes like TYK2, revealing the **active site** where the enzyme does its work.\n\n\
         **Model Answer:** \"Scientists mapped TYK2's 3D structure and identified the ATP-binding pocket (active site). Envudeucitinib was designed to fit into this pocket, competing with ATP for the binding site. When the drug occupies the active site, TYK2 cannot phosphorylate STAT proteins, blocking the inflammatory signal. This is competitive inhibition.\"\n\n\
         **Study:**\n",
    );
    resource_line(&mut out, 1, &CK12_ENZYMES, "How enzymes work");
    resource_line(&mut out, 2, &KHAN_ENZYME_INHIBITION, "Competitive inhibition");
    out.push_str(
        "\n**Question 8 - Stock Surge & Drug Development:**\n\n\
         The 95% stock jump reflects the **massive risk reduction** that Phase 3 success represents.\n\n\
         **Model Answer:** \"Phase 3 is the final and largest clinical trial. Since only about 10% of Phase 1 drugs reach the market, positive Phase 3 results dramatically increase the probability of FDA approval and commercial success. Investors see large future revenue, and the stock price reflects that expected value.\"\n\n\
         **Study:**\n",
    );
    resource_line(&mut out, 1, &FDA_DRUG_DEVELOPMENT, "The approval pipeline");
    resource_line(&mut out, 2, &CK12_AUTOIMMUNE, "Why these diseases need new drugs");
    out
}
