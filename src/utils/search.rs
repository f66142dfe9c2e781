use crate::models::employee::Employee;

/// Naive filter used by the list screen: `name` and `email` match
/// case-insensitively, `mobileNo` matches a verbatim substring.
/// A blank query keeps everything.
pub fn search<'a>(query: &str, records: &'a [Employee]) -> Vec<&'a Employee> {
    let query = query.trim();
    if query.is_empty() {
        return records.iter().collect();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| {
            r.name.to_lowercase().contains(&needle)
                || r.email.to_lowercase().contains(&needle)
                || r.mobile_no.contains(query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employee::Gender;
    use chrono::Utc;
    use uuid::Uuid;

    fn employee(name: &str, email: &str, mobile_no: &str) -> Employee {
        Employee {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            mobile_no: mobile_no.into(),
            designation: "Sales".into(),
            gender: Gender::Male,
            course: vec!["BCA".into()],
            image_path: None,
            created_at: Utc::now(),
        }
    }

    fn names(hits: Vec<&Employee>) -> Vec<&str> {
        hits.into_iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn matches_name_or_email_ignoring_case() {
        let records = vec![
            employee("Jane Doe", "jd@example.com", "111"),
            employee("Bob", "JANE.b@example.com", "222"),
            employee("Alice", "alice@example.com", "333"),
        ];

        assert_eq!(names(search("jane", &records)), vec!["Jane Doe", "Bob"]);
        assert_eq!(names(search("ALICE", &records)), vec!["Alice"]);
    }

    #[test]
    fn matches_partial_mobile_number() {
        let records = vec![
            employee("A", "a@example.com", "9876543210"),
            employee("B", "b@example.com", "1234500000"),
        ];

        assert_eq!(names(search("6543", &records)), vec!["A"]);
        assert_eq!(names(search("12345", &records)), vec!["B"]);
    }

    #[test]
    fn blank_query_returns_everything() {
        let records = vec![employee("A", "a@example.com", "1"), employee("B", "b@example.com", "2")];
        assert_eq!(search("   ", &records).len(), 2);
        assert!(search("nobody", &records).is_empty());
    }
}
