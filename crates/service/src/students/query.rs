use models::Student;
use serde::Deserialize;

use crate::errors::ServiceError;
use crate::pagination::Pagination;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    Age,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// List options, deserializable straight from the `/students` query string.
/// - `q`: case-insensitive substring of name or email; empty means no filter
/// - `department`: exact match, a missing department compares as `""`
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct StudentQuery {
    #[serde(default, rename = "q")]
    pub search: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub sort_by: Option<SortField>,
    #[serde(default)]
    pub order: SortOrder,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: usize,
}

impl StudentQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination { offset: self.offset, limit: self.limit }
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        self.pagination().validate()
    }

    /// Filter, then sort, then window.
    pub fn apply(&self, students: Vec<Student>) -> Vec<Student> {
        let needle = self.search.as_deref().filter(|q| !q.is_empty()).map(str::to_lowercase);
        let mut results: Vec<Student> = students
            .into_iter()
            .filter(|s| needle.as_deref().map_or(true, |n| matches_search(s, n)))
            .filter(|s| self.department.as_deref().map_or(true, |d| s.department_or_empty() == d))
            .collect();
        if let Some(field) = self.sort_by {
            sort_students(&mut results, field, self.order);
        }
        self.pagination().apply(results)
    }
}

fn matches_search(student: &Student, needle: &str) -> bool {
    student.name.to_lowercase().contains(needle) || student.email.to_lowercase().contains(needle)
}

/// Stable in both directions: ties keep their stored order.
fn sort_students(students: &mut [Student], field: SortField, order: SortOrder) {
    students.sort_by(|a, b| {
        let ord = match field {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Age => a.age.cmp(&b.age),
        };
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::NewStudent;

    fn student(name: &str, email: &str, age: i64, department: Option<&str>) -> Student {
        NewStudent {
            name: name.into(),
            email: email.into(),
            age,
            department: department.map(String::from),
            cgpa: 3,
        }
        .into_student()
    }

    fn roster() -> Vec<Student> {
        vec![
            student("Eve", "eve@uni.edu", 30, Some("CS")),
            student("Bob", "bob@uni.edu", 20, Some("Math")),
            student("Dan", "dan@uni.edu", 20, None),
            student("Amy", "amy@lab.org", 25, Some("CS")),
            student("Cid", "cid@uni.edu", 40, Some("")),
        ]
    }

    fn names(students: &[Student]) -> Vec<&str> {
        students.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn default_query_returns_storage_order() {
        let out = StudentQuery::default().apply(roster());
        assert_eq!(names(&out), vec!["Eve", "Bob", "Dan", "Amy", "Cid"]);
    }

    #[test]
    fn search_matches_name_or_email_case_insensitively() {
        let q = StudentQuery { search: Some("LAB".into()), ..Default::default() };
        assert_eq!(names(&q.apply(roster())), vec!["Amy"]);

        let q = StudentQuery { search: Some("bO".into()), ..Default::default() };
        assert_eq!(names(&q.apply(roster())), vec!["Bob"]);

        let q = StudentQuery { search: Some(String::new()), ..Default::default() };
        assert_eq!(q.apply(roster()).len(), 5);
    }

    #[test]
    fn department_filter_is_exact_and_empty_matches_missing() {
        let q = StudentQuery { department: Some("CS".into()), ..Default::default() };
        assert_eq!(names(&q.apply(roster())), vec!["Eve", "Amy"]);

        let q = StudentQuery { department: Some("cs".into()), ..Default::default() };
        assert!(q.apply(roster()).is_empty());

        let q = StudentQuery { department: Some(String::new()), ..Default::default() };
        assert_eq!(names(&q.apply(roster())), vec!["Dan", "Cid"]);
    }

    #[test]
    fn sort_by_age_is_stable_both_ways() {
        let asc = StudentQuery { sort_by: Some(SortField::Age), ..Default::default() };
        assert_eq!(names(&asc.apply(roster())), vec!["Bob", "Dan", "Amy", "Eve", "Cid"]);

        let desc = StudentQuery { sort_by: Some(SortField::Age), order: SortOrder::Desc, ..Default::default() };
        assert_eq!(names(&desc.apply(roster())), vec!["Cid", "Eve", "Amy", "Bob", "Dan"]);
    }

    #[test]
    fn sort_by_name() {
        let q = StudentQuery { sort_by: Some(SortField::Name), order: SortOrder::Desc, ..Default::default() };
        assert_eq!(names(&q.apply(roster())), vec!["Eve", "Dan", "Cid", "Bob", "Amy"]);
    }

    #[test]
    fn offset_two_limit_one_returns_third_after_sort() {
        let q = StudentQuery {
            sort_by: Some(SortField::Name),
            offset: 2,
            limit: Some(1),
            ..Default::default()
        };
        assert_eq!(names(&q.apply(roster())), vec!["Cid"]);
    }

    #[test]
    fn order_without_sort_field_is_ignored() {
        let q = StudentQuery { order: SortOrder::Desc, ..Default::default() };
        assert_eq!(names(&q.apply(roster())), vec!["Eve", "Bob", "Dan", "Amy", "Cid"]);
    }

    #[test]
    fn zero_limit_fails_validation() {
        let q = StudentQuery { limit: Some(0), ..Default::default() };
        assert!(matches!(q.validate(), Err(ServiceError::Validation(_))));
    }
}
