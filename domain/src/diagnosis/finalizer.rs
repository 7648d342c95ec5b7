//! Diagnosis finalizer: turns a terminated session into a result.

use super::policy::ScoringPolicy;
use super::result::{
    DiagnosisRecommendations, DiagnosisResult, LOW_CONFIDENCE_DISCLAIMER, RankedCondition,
    STANDARD_DISCLAIMER, TerminationReason,
};
use crate::condition::KnowledgeBase;
use std::cmp::Ordering;

/// Rank conditions best first.
///
/// Order: normalized confidence, then raw score (separates conditions that
/// are all at zero confidence), then catalog order.
pub fn rank(
    knowledge: &KnowledgeBase,
    raw: &[f64],
    confidence: &[f64],
    limit: usize,
) -> Vec<RankedCondition> {
    let mut order: Vec<usize> = (0..knowledge.len()).collect();
    order.sort_by(|&a, &b| {
        confidence[b]
            .partial_cmp(&confidence[a])
            .unwrap_or(Ordering::Equal)
            .then_with(|| raw[b].partial_cmp(&raw[a]).unwrap_or(Ordering::Equal))
            .then_with(|| a.cmp(&b))
    });

    let conditions = knowledge.conditions();
    order
        .into_iter()
        .take(limit)
        .map(|i| RankedCondition {
            condition_id: conditions[i].id().clone(),
            name: conditions[i].name().to_string(),
            confidence: confidence[i],
        })
        .collect()
}

/// Build the final result from the ranked scores.
///
/// The best candidate is always reported; below the policy's
/// `min_confidence` floor it carries the low-confidence disclaimer instead
/// of the standard one.
pub fn finalize(
    knowledge: &KnowledgeBase,
    policy: &ScoringPolicy,
    raw: &[f64],
    confidence: &[f64],
    questions_asked: usize,
    reason: TerminationReason,
) -> DiagnosisResult {
    let ranking = rank(knowledge, raw, confidence, policy.ranking_size.max(1));
    // The knowledge base is never empty, so the ranking has a head.
    let top = ranking[0].clone();
    let condition = knowledge
        .get(&top.condition_id)
        .unwrap_or(&knowledge.conditions()[0]);
    let bundle = condition.recommendations();

    let low_confidence = top.confidence < policy.min_confidence;
    let disclaimer = if low_confidence {
        LOW_CONFIDENCE_DISCLAIMER
    } else {
        STANDARD_DISCLAIMER
    };

    DiagnosisResult {
        condition_id: top.condition_id,
        condition_name: top.name,
        confidence: top.confidence,
        low_confidence,
        recommendations: DiagnosisRecommendations {
            medicines: bundle.medicines.clone(),
            exercises: bundle.exercises.clone(),
            diet: bundle.diet.clone(),
            doctor_specialization: bundle.doctor_specialization.clone(),
            description: bundle.description.clone(),
            disclaimer: disclaimer.to_string(),
        },
        ranking,
        questions_asked,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{Condition, Recommendations};

    fn kb() -> KnowledgeBase {
        KnowledgeBase::new(vec![
            Condition::new("Cold", ["cough"]).with_recommendations(Recommendations {
                medicines: vec!["Rest".to_string()],
                doctor_specialization: "General Practitioner".to_string(),
                ..Recommendations::default()
            }),
            Condition::new("Flu", ["fever"]),
            Condition::new("Asthma", ["wheezing"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_rank_orders_by_confidence_then_raw_then_catalog() {
        let kb = kb();
        let ranking = rank(&kb, &[-1.0, 2.0, -0.5], &[0.0, 1.0, 0.0], 3);
        let names: Vec<_> = ranking.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Flu", "Asthma", "Cold"]);

        let ranking = rank(&kb, &[1.0, 1.0, 1.0], &[0.4, 0.2, 0.4], 2);
        let names: Vec<_> = ranking.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Cold", "Asthma"]);
    }

    #[test]
    fn test_finalize_attaches_bundle_and_standard_disclaimer() {
        let kb = kb();
        let result = finalize(
            &kb,
            &ScoringPolicy::default(),
            &[3.0, 0.5, 0.5],
            &[0.75, 0.125, 0.125],
            4,
            TerminationReason::ConfidenceReached,
        );
        assert_eq!(result.condition_name, "Cold");
        assert_eq!(result.recommendations.medicines, vec!["Rest"]);
        assert_eq!(result.recommendations.disclaimer, STANDARD_DISCLAIMER);
        assert!(!result.low_confidence);
        assert_eq!(result.questions_asked, 4);
        assert_eq!(result.ranking.len(), 3);
    }

    #[test]
    fn test_finalize_strengthens_disclaimer_below_floor() {
        let kb = kb();
        let result = finalize(
            &kb,
            &ScoringPolicy::default(),
            &[1.0, 1.0, 1.0],
            &[1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0],
            10,
            TerminationReason::QuestionLimit,
        );
        // Still names the best candidate.
        assert_eq!(result.condition_name, "Cold");
        assert!(result.low_confidence);
        assert_eq!(result.recommendations.disclaimer, LOW_CONFIDENCE_DISCLAIMER);
    }
}
