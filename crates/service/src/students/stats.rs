use std::collections::BTreeMap;

use models::Student;
use serde::{Serialize, Serializer};

/// Label used for records without a department.
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StudentStats {
    pub total_students: usize,
    /// rounded to two decimals, `0` for an empty store
    #[serde(serialize_with = "serialize_average")]
    pub average_age: f64,
    pub count_per_department: BTreeMap<String, usize>,
}

impl StudentStats {
    pub fn from_students(students: &[Student]) -> Self {
        let total_students = students.len();
        let average_age = if total_students == 0 {
            0.0
        } else {
            let sum: i64 = students.iter().map(|s| s.age).sum();
            round2(sum as f64 / total_students as f64)
        };
        let mut count_per_department = BTreeMap::new();
        for s in students {
            let label = match s.department_or_empty() {
                "" => UNKNOWN_DEPARTMENT,
                d => d,
            };
            *count_per_department.entry(label.to_string()).or_insert(0) += 1;
        }
        Self { total_students, average_age, count_per_department }
    }
}

/// Half-to-even, so an exact x.xx5 average goes to the even hundredth.
fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}

/// An empty store reports the integer `0`; ages are at least 10, so a zero
/// average only occurs without records.
fn serialize_average<S: Serializer>(avg: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if *avg == 0.0 {
        serializer.serialize_u64(0)
    } else {
        serializer.serialize_f64(*avg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::NewStudent;
    use serde_json::json;

    fn student(age: i64, department: Option<&str>) -> Student {
        NewStudent {
            name: "Sam".into(),
            email: format!("sam{age}@uni.edu"),
            age,
            department: department.map(String::from),
            cgpa: 3,
        }
        .into_student()
    }

    #[test]
    fn empty_store() {
        let stats = StudentStats::from_students(&[]);
        assert_eq!(stats.total_students, 0);
        assert_eq!(stats.average_age, 0.0);
        assert!(stats.count_per_department.is_empty());
        assert_eq!(
            serde_json::to_value(&stats).unwrap(),
            json!({"total_students": 0, "average_age": 0, "count_per_department": {}})
        );
    }

    #[test]
    fn missing_department_counts_as_unknown() {
        let stats = StudentStats::from_students(&[student(20, Some("CS")), student(30, None)]);
        assert_eq!(
            serde_json::to_value(&stats).unwrap(),
            json!({"total_students": 2, "average_age": 25.0, "count_per_department": {"CS": 1, "Unknown": 1}})
        );
    }

    #[test]
    fn empty_department_string_counts_as_unknown() {
        let stats = StudentStats::from_students(&[student(20, Some("")), student(21, None)]);
        assert_eq!(stats.count_per_department.get(UNKNOWN_DEPARTMENT), Some(&2));
    }

    #[test]
    fn empty_average_serializes_as_integer_zero() {
        let v = serde_json::to_value(StudentStats::from_students(&[])).unwrap();
        assert!(v["average_age"].is_u64());
        assert_eq!(v["average_age"].as_u64(), Some(0));
    }

    #[test]
    fn exact_half_average_rounds_to_even() {
        // 7 x 20 + 21 = 161, 161 / 8 = 20.125 exactly
        let mut students: Vec<Student> = (0..7).map(|_| student(20, None)).collect();
        students.push(student(21, None));
        let stats = StudentStats::from_students(&students);
        assert_eq!(stats.average_age, 20.12);

        // 20 + 20 + 20 + 21 = 81, 81 / 4 = 20.25, no rounding needed
        let stats = StudentStats::from_students(&[student(20, None), student(20, None), student(20, None), student(21, None)]);
        assert_eq!(stats.average_age, 20.25);

        // 5 x 20 + 3 x 23 = 169, 169 / 8 = 21.125
        let mut students: Vec<Student> = (0..5).map(|_| student(20, None)).collect();
        students.extend((0..3).map(|_| student(23, None)));
        assert_eq!(StudentStats::from_students(&students).average_age, 21.12);
    }

    #[test]
    fn average_rounds_to_two_decimals() {
        let stats = StudentStats::from_students(&[student(20, None), student(20, None), student(21, None)]);
        assert_eq!(stats.average_age, 20.33);
    }
}
