//! Built-in condition catalog
//!
//! Used when no external dataset is configured. Symptoms shared between
//! conditions (cough, headache, fatigue, ...) are what lets the engine
//! discriminate between them.

use super::entities::{Condition, Recommendations};

fn bundle(
    medicines: &[&str],
    exercises: &[&str],
    diet: &[&str],
    doctor_specialization: &str,
    description: &str,
) -> Recommendations {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
    Recommendations {
        medicines: owned(medicines),
        exercises: owned(exercises),
        diet: owned(diet),
        doctor_specialization: doctor_specialization.to_string(),
        description: description.to_string(),
    }
}

/// The default catalog, in the order the engine breaks ties by.
pub fn builtin_conditions() -> Vec<Condition> {
    vec![
        Condition::new(
            "Common Cold",
            ["runny nose", "cough", "sore throat", "sneezing", "fatigue"],
        )
        .with_prior(0.2)
        .with_recommendations(bundle(
            &["Acetaminophen", "Ibuprofen", "Decongestants", "Cough syrups"],
            &["Rest", "Light walking", "Deep breathing exercises"],
            &["Warm fluids", "Chicken soup", "Citrus fruits", "Honey and ginger tea"],
            "General Practitioner",
            "Viral infection affecting upper respiratory tract",
        )),
        Condition::new(
            "Influenza",
            ["fever", "cough", "body aches", "chills", "fatigue", "sore throat"],
        )
        .with_prior(0.15)
        .with_recommendations(bundle(
            &["Oseltamivir", "Acetaminophen", "Ibuprofen"],
            &["Bed rest", "Gentle stretching during recovery"],
            &["Plenty of fluids", "Broths", "Easily digestible foods"],
            "General Practitioner",
            "Contagious respiratory illness caused by influenza viruses",
        )),
        Condition::new(
            "Migraine",
            ["headache", "nausea", "sensitivity to light", "visual disturbances"],
        )
        .with_prior(0.12)
        .with_recommendations(bundle(
            &["Sumatriptan", "Rizatriptan", "Acetaminophen", "Ibuprofen"],
            &["Neck stretches", "Relaxation techniques", "Regular sleep schedule"],
            &["Regular meals", "Stay hydrated", "Limit caffeine", "Avoid aged cheese"],
            "Neurologist",
            "Recurring headaches with moderate to severe pain",
        )),
        Condition::new(
            "Allergic Rhinitis",
            ["sneezing", "runny nose", "itchy eyes", "nasal congestion"],
        )
        .with_prior(0.15)
        .with_recommendations(bundle(
            &["Antihistamines", "Nasal corticosteroids", "Decongestants"],
            &["Nasal irrigation", "Avoid allergens", "Indoor air purification"],
            &["Local honey", "Omega-3 rich fish", "Vitamin C rich fruits"],
            "Allergist",
            "Allergic reaction causing inflammation in the nose",
        )),
        Condition::new(
            "Anxiety Disorder",
            ["excessive worry", "restlessness", "rapid heartbeat", "sweating", "fatigue"],
        )
        .with_prior(0.12)
        .with_recommendations(bundle(
            &["SSRIs", "Benzodiazepines", "Beta-blockers"],
            &["Deep breathing", "Yoga", "Regular cardio exercise", "Meditation"],
            &["Limit caffeine", "Avoid alcohol", "Complex carbohydrates", "Magnesium rich foods"],
            "Psychiatrist",
            "Mental health condition characterized by excessive anxiety",
        )),
        Condition::new(
            "Depression",
            ["persistent sadness", "loss of interest", "sleep problems", "fatigue"],
        )
        .with_prior(0.12)
        .with_recommendations(bundle(
            &["SSRIs", "SNRIs", "Bupropion"],
            &["Daily walks", "Group exercise classes", "Yoga"],
            &["Omega-3 rich fish", "Leafy greens", "Whole grains", "Avoid alcohol"],
            "Psychiatrist",
            "Mood disorder causing a persistent feeling of sadness and loss of interest",
        )),
        Condition::new(
            "Hypertension",
            ["high blood pressure", "headache", "dizziness", "chest pain"],
        )
        .with_prior(0.15)
        .with_recommendations(bundle(
            &["ACE inhibitors", "Diuretics", "Beta-blockers", "Calcium channel blockers"],
            &["Regular cardio", "Walking", "Swimming", "Weight training"],
            &["DASH diet", "Reduce salt", "Potassium rich foods", "Limit alcohol"],
            "Cardiologist",
            "High blood pressure condition",
        )),
        Condition::new(
            "Type 2 Diabetes",
            ["frequent urination", "excessive thirst", "blurred vision", "fatigue"],
        )
        .with_prior(0.1)
        .with_recommendations(bundle(
            &["Metformin", "Sulfonylureas", "DPP-4 inhibitors", "Insulin"],
            &["Brisk walking", "Resistance training", "Cycling"],
            &["Low glycemic index foods", "High fiber vegetables", "Lean protein", "Avoid sugary drinks"],
            "Endocrinologist",
            "Chronic condition affecting the way the body processes blood sugar",
        )),
        Condition::new(
            "Asthma",
            ["wheezing", "shortness of breath", "chest tightness", "cough"],
        )
        .with_prior(0.1)
        .with_recommendations(bundle(
            &["Inhaled corticosteroids", "Albuterol", "Montelukast"],
            &["Swimming", "Breathing exercises", "Warm-up before exercise"],
            &["Fruits and vegetables", "Vitamin D rich foods", "Avoid sulfites"],
            "Pulmonologist",
            "Chronic condition in which the airways narrow and swell",
        )),
        Condition::new(
            "Osteoarthritis",
            ["joint pain", "joint stiffness", "reduced range of motion", "swelling"],
        )
        .with_prior(0.1)
        .with_recommendations(bundle(
            &["Acetaminophen", "NSAIDs", "Topical diclofenac"],
            &["Low impact aerobics", "Water aerobics", "Range of motion exercises"],
            &["Anti-inflammatory foods", "Omega-3 rich fish", "Maintain healthy weight"],
            "Rheumatologist",
            "Degeneration of joint cartilage and the underlying bone",
        )),
        Condition::new(
            "Gastroenteritis",
            ["diarrhea", "nausea", "vomiting", "stomach cramps", "fever"],
        )
        .with_prior(0.12)
        .with_recommendations(bundle(
            &["Oral rehydration salts", "Loperamide", "Ondansetron"],
            &["Rest until symptoms resolve"],
            &["BRAT diet", "Clear fluids", "Avoid dairy until recovered"],
            "Gastroenterologist",
            "Inflammation of the stomach and intestines, usually from infection",
        )),
        Condition::new(
            "GERD",
            ["heartburn", "chest pain", "regurgitation", "difficulty swallowing"],
        )
        .with_prior(0.1)
        .with_recommendations(bundle(
            &["Proton pump inhibitors", "H2 blockers", "Antacids"],
            &["Walking after meals", "Avoid exercise right after eating"],
            &["Smaller meals", "Avoid spicy foods", "Avoid late meals", "Limit caffeine"],
            "Gastroenterologist",
            "Chronic acid reflux irritating the esophagus",
        )),
    ]
}
