//! Ranking Engine
//!
//! Assigns dense ranks per scholarship group: descending by total score,
//! ties kept in encounter order, ranks 1..N with no gaps or shared values.

use crate::types::ScoredApplication;

/// Rank all applications per scholarship. Groups keep their first-seen
/// order; within a group the sort is stable, so equal scores keep the order
/// they arrived in and still receive distinct consecutive ranks.
pub fn assign_ranks(applications: &mut Vec<ScoredApplication>) {
    let mut groups: Vec<(String, Vec<ScoredApplication>)> = Vec::new();

    for application in applications.drain(..) {
        match groups
            .iter_mut()
            .find(|(id, _)| *id == application.scholarship_id)
        {
            Some((_, members)) => members.push(application),
            None => groups.push((application.scholarship_id.clone(), vec![application])),
        }
    }

    for (_, members) in groups.iter_mut() {
        rank_group(members);
    }

    for (_, members) in groups {
        applications.extend(members);
    }
}

/// Rank the whole pool as one group, ignoring scholarship boundaries. Used
/// for runs where only a single scholarship is in play.
pub fn assign_global_ranks(applications: &mut [ScoredApplication]) {
    rank_group(applications);
}

fn rank_group(members: &mut [ScoredApplication]) {
    // sort_by is stable: equal totals keep encounter order
    members.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for (position, application) in members.iter_mut().enumerate() {
        application.rank = (position + 1) as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_scored(application_id: &str, scholarship_id: &str, score: f64) -> ScoredApplication {
        ScoredApplication {
            id: application_id.to_string(),
            application_id: application_id.to_string(),
            scholarship_id: scholarship_id.to_string(),
            user_id: format!("user-{}", application_id),
            name: "Test Applicant".to_string(),
            about_me: None,
            contact_number: None,
            income_amount: 0.0,
            tenth_marks: 0.0,
            twelfth_marks: 0.0,
            income_score: 0.0,
            marks_score: 0.0,
            emotion_score: 0.0,
            score,
            rank: 0,
        }
    }

    fn rank_of(applications: &[ScoredApplication], application_id: &str) -> u32 {
        applications
            .iter()
            .find(|a| a.application_id == application_id)
            .map(|a| a.rank)
            .unwrap_or(0)
    }

    #[test]
    fn test_dense_ranks_with_stable_tie_break() {
        let mut applications = vec![
            make_scored("a", "sch-1", 80.0),
            make_scored("b", "sch-1", 80.0),
            make_scored("c", "sch-1", 95.0),
            make_scored("d", "sch-1", 60.0),
        ];

        assign_ranks(&mut applications);

        // the two 80s keep encounter order: a before b
        assert_eq!(rank_of(&applications, "a"), 2);
        assert_eq!(rank_of(&applications, "b"), 3);
        assert_eq!(rank_of(&applications, "c"), 1);
        assert_eq!(rank_of(&applications, "d"), 4);
    }

    #[test]
    fn test_ranks_restart_per_group() {
        let mut applications = vec![
            make_scored("a", "sch-1", 70.0),
            make_scored("b", "sch-2", 90.0),
            make_scored("c", "sch-1", 85.0),
            make_scored("d", "sch-2", 40.0),
            make_scored("e", "sch-1", 55.0),
        ];

        assign_ranks(&mut applications);

        assert_eq!(rank_of(&applications, "c"), 1);
        assert_eq!(rank_of(&applications, "a"), 2);
        assert_eq!(rank_of(&applications, "e"), 3);
        assert_eq!(rank_of(&applications, "b"), 1);
        assert_eq!(rank_of(&applications, "d"), 2);
    }

    #[test]
    fn test_groups_keep_encounter_order() {
        let mut applications = vec![
            make_scored("a", "sch-2", 10.0),
            make_scored("b", "sch-1", 99.0),
            make_scored("c", "sch-2", 50.0),
        ];

        assign_ranks(&mut applications);

        // sch-2 was seen first, so its members come out first
        assert_eq!(applications[0].scholarship_id, "sch-2");
        assert_eq!(applications[1].scholarship_id, "sch-2");
        assert_eq!(applications[2].scholarship_id, "sch-1");
    }

    #[test]
    fn test_ranks_are_contiguous_per_group() {
        let mut applications = vec![
            make_scored("a", "sch-1", 50.0),
            make_scored("b", "sch-1", 50.0),
            make_scored("c", "sch-1", 50.0),
            make_scored("d", "sch-1", 50.0),
        ];

        assign_ranks(&mut applications);

        let mut ranks: Vec<u32> = applications.iter().map(|a| a.rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_global_ranking_ignores_groups() {
        let mut applications = vec![
            make_scored("a", "sch-1", 70.0),
            make_scored("b", "sch-2", 90.0),
            make_scored("c", "sch-3", 80.0),
        ];

        assign_global_ranks(&mut applications);

        assert_eq!(rank_of(&applications, "b"), 1);
        assert_eq!(rank_of(&applications, "c"), 2);
        assert_eq!(rank_of(&applications, "a"), 3);
    }

    #[test]
    fn test_empty_input() {
        let mut applications: Vec<ScoredApplication> = vec![];
        assign_ranks(&mut applications);
        assert!(applications.is_empty());
    }
}
