//! Built-in field tables
//!
//! Positions are in points measured from the top-left corner of a US
//! Letter template page. They were tuned by eye against the physical
//! templates, so a template revision needs a matching table update (or a
//! JSON override, see `SchemaRegistry::from_json_file`).

use super::field::FieldSpec;
use crate::types::FormType;

pub(crate) fn fields_for(form_type: FormType) -> Vec<FieldSpec> {
    match form_type {
        FormType::Ibhs => ibhs_fields(),
        FormType::CommunityCare => community_care_fields(),
    }
}

fn ibhs_fields() -> Vec<FieldSpec> {
    vec![
        // Member information
        FieldSpec::text("child_name", 0, 250.0, 150.0),
        FieldSpec::text("dob", 0, 554.7, 150.0),
        FieldSpec::text("chosen_name", 0, 250.0, 172.0),
        FieldSpec::text("pronouns", 0, 412.0, 172.0),
        FieldSpec::text("ma_id", 0, 68.7, 198.0),
        FieldSpec::text("today_date", 0, 554.7, 198.0),
        FieldSpec::text("parent_guardian", 0, 250.0, 228.0),
        FieldSpec::text("address", 0, 250.0, 253.3),
        FieldSpec::text("phone", 0, 557.3, 253.3),
        FieldSpec::text("school", 0, 250.0, 276.7),
        FieldSpec::text("other_agency", 0, 250.0, 300.0),
        // Evaluation
        FieldSpec::text("date_evaluated", 0, 128.0, 350.0),
        FieldSpec::text("child_evaluated", 0, 250.0, 350.0),
        FieldSpec::text("other_levels_of_care", 0, 303.3, 380.0),
        FieldSpec::text("ebts_considered", 0, 430.7, 406.7),
        FieldSpec::text("child_assessment", 0, 250.0, 466.7),
        // Diagnoses
        FieldSpec::multiline("current_diagnoses", 0, 250.0, 636.7),
        FieldSpec::text("behavioral_health_2", 0, 250.0, 660.0),
        FieldSpec::text("behavioral_health_3", 0, 250.0, 683.3),
        // Medical conditions
        FieldSpec::text("medical_conditions_1", 0, 250.0, 723.3),
        FieldSpec::text("medical_conditions_2", 0, 250.0, 746.7),
        FieldSpec::text("medical_conditions_3", 0, 250.0, 770.0),
        // Clinical information
        FieldSpec::multiline("clinical_info", 1, 133.3, 266.7),
        // Therapeutic needs and measurable improvements
        FieldSpec::multiline("therapeutic_need_1", 2, 163.3, 153.3),
        FieldSpec::multiline("measurable_improvement_1", 2, 453.3, 153.3),
        FieldSpec::multiline("therapeutic_need_2", 2, 163.3, 266.7),
        FieldSpec::multiline("measurable_improvement_2", 2, 453.3, 266.7),
        FieldSpec::multiline("therapeutic_need_3", 2, 163.3, 380.0),
        FieldSpec::multiline("measurable_improvement_3", 2, 453.3, 380.0),
        FieldSpec::multiline("therapeutic_need_4", 2, 163.3, 493.3),
        FieldSpec::multiline("measurable_improvement_4", 2, 453.3, 493.3),
        FieldSpec::multiline("therapeutic_need_5", 2, 163.3, 606.7),
        FieldSpec::multiline("measurable_improvement_5", 2, 453.3, 606.7),
        FieldSpec::multiline("therapeutic_need_6", 2, 163.3, 720.0),
        FieldSpec::multiline("measurable_improvement_6", 2, 453.3, 720.0),
        // Services, settings and hours
        FieldSpec::checkbox("ibhs_individual", 3, 28.0, 294.0),
        FieldSpec::checkbox("mobile_therapist", 3, 154.7, 294.0),
        FieldSpec::text("mt_hours", 3, 388.7, 294.0),
        FieldSpec::checkbox("home_setting", 3, 470.0, 294.0),
        FieldSpec::checkbox("school_setting", 3, 505.3, 294.0),
        FieldSpec::checkbox("community_setting", 3, 563.3, 294.0),
        FieldSpec::checkbox("behavior_consultant", 3, 154.7, 313.3),
        FieldSpec::text("bc_hours", 3, 388.7, 313.3),
        FieldSpec::checkbox("center_based", 3, 470.0, 313.3),
        FieldSpec::checkbox("behavior_technician", 3, 154.7, 333.3),
        FieldSpec::text("bht_hours", 3, 388.7, 333.3),
        FieldSpec::multiline("community_locations", 3, 533.3, 348.7),
        FieldSpec::checkbox("ibhs_group", 3, 28.0, 376.0),
        FieldSpec::text("group_hours", 3, 388.7, 376.0),
        FieldSpec::checkbox("aba_individual", 3, 28.0, 442.0),
        FieldSpec::checkbox("bcba", 3, 154.7, 432.0),
        FieldSpec::text("bcba_hours", 3, 388.7, 432.0),
        FieldSpec::checkbox("aba_home", 3, 470.0, 432.0),
        FieldSpec::checkbox("aba_school", 3, 505.3, 432.0),
        FieldSpec::checkbox("aba_community", 3, 563.3, 432.0),
        FieldSpec::checkbox("bc_aba", 3, 154.7, 452.0),
        FieldSpec::text("bc_aba_hours", 3, 388.7, 452.0),
        FieldSpec::checkbox("aba_center_based", 3, 470.0, 453.3),
        // Prescriber and signatures
        FieldSpec::text("prescriber_name", 4, 250.0, 138.0),
        FieldSpec::text("degree", 4, 500.0, 138.0),
        FieldSpec::text("license_type", 4, 210.0, 166.7),
        FieldSpec::text("npi", 4, 340.0, 166.7),
        FieldSpec::text("promise_id", 4, 576.7, 166.7),
        FieldSpec::text("prescriber_email", 4, 433.3, 198.0),
        FieldSpec::text("prescriber_phone", 4, 260.0, 225.3),
        FieldSpec::text("prescriber_signature_date", 4, 554.0, 281.3),
        FieldSpec::text("parent_name", 4, 433.3, 390.0),
        FieldSpec::text("parent_signature_date", 4, 554.0, 428.7),
        FieldSpec::text("member_name", 4, 433.3, 474.7),
        FieldSpec::text("member_signature_date", 4, 554.0, 516.7),
    ]
}

fn community_care_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("recipient_name", 0, 166.7, 150.0),
        FieldSpec::text("dob", 0, 433.3, 150.0),
        FieldSpec::text("chosen_name", 0, 166.7, 173.3),
        FieldSpec::text("pronouns", 0, 433.3, 173.3),
        FieldSpec::text("ma_id", 0, 166.7, 196.7),
        FieldSpec::text("today_date", 0, 433.3, 196.7),
        FieldSpec::text("parent_guardian", 0, 166.7, 220.0),
        FieldSpec::text("address", 0, 166.7, 243.3),
        FieldSpec::text("phone", 0, 433.3, 243.3),
        FieldSpec::text("age", 0, 166.7, 266.7),
        FieldSpec::multiline("diagnoses", 0, 166.7, 333.3),
        FieldSpec::multiline("symptoms", 0, 166.7, 433.3),
    ]
}
