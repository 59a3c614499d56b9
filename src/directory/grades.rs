// Score synthesis for new registrations

use crate::models::{CourseGrade, CourseRange};
use rand::Rng;

/// Draw one score per course, uniformly from `[min, max)`
pub fn generate_grades(scheme: &[CourseRange]) -> Vec<CourseGrade> {
    let mut rng = rand::thread_rng();
    scheme
        .iter()
        .map(|range| CourseGrade {
            course: range.course.clone(),
            score: rng.gen_range(range.min..range.max),
        })
        .collect()
}
