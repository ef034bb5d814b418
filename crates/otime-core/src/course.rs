//! Course definitions - ordered control sequences runners must visit.

use crate::types::{ControlCode, CourseName, ValidationError};

/// An ordered sequence of controls making up one course.
///
/// The control list is non-empty by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDefinition {
    /// The course name.
    pub name: CourseName,
    controls: Vec<ControlCode>,
}

impl CourseDefinition {
    /// Creates a course definition, rejecting an empty control list.
    pub fn new(name: CourseName, controls: Vec<ControlCode>) -> Result<Self, ValidationError> {
        if controls.is_empty() {
            return Err(ValidationError::Empty {
                field: "course controls",
            });
        }
        Ok(Self { name, controls })
    }

    /// Returns the full control sequence.
    pub fn controls(&self) -> &[ControlCode] {
        &self.controls
    }

    /// Returns the last control on the course.
    pub fn final_control(&self) -> &ControlCode {
        &self.controls[self.controls.len() - 1]
    }

    /// Returns the control sequence without its final control.
    ///
    /// This is the matched sequence when the final control is tolerated as
    /// missing (official-finish fallback) or serves as a lap boundary. Empty
    /// for a single-control course.
    pub fn core_controls(&self) -> &[ControlCode] {
        &self.controls[..self.controls.len() - 1]
    }
}

/// Courses in declaration order.
///
/// Declaration order is the priority order for first-match-wins matching,
/// so it is preserved rather than sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseSet {
    courses: Vec<CourseDefinition>,
}

impl CourseSet {
    /// Creates an empty course set.
    pub const fn new() -> Self {
        Self {
            courses: Vec::new(),
        }
    }

    /// Appends a course, keeping declaration order.
    pub fn push(&mut self, course: CourseDefinition) {
        self.courses.push(course);
    }

    /// Returns the courses in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, CourseDefinition> {
        self.courses.iter()
    }

    /// Looks up a course by name.
    pub fn get(&self, name: &str) -> Option<&CourseDefinition> {
        self.courses.iter().find(|c| c.name.as_str() == name)
    }

    /// Returns the number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Returns true if the set holds no courses.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl<'a> IntoIterator for &'a CourseSet {
    type Item = &'a CourseDefinition;
    type IntoIter = std::slice::Iter<'a, CourseDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.courses.iter()
    }
}

impl FromIterator<CourseDefinition> for CourseSet {
    fn from_iter<I: IntoIterator<Item = CourseDefinition>>(iter: I) -> Self {
        Self {
            courses: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(name: &str, controls: &[&str]) -> CourseDefinition {
        CourseDefinition::new(
            CourseName::new(name).unwrap(),
            controls
                .iter()
                .map(|c| ControlCode::new(*c).unwrap())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_empty_controls() {
        let result = CourseDefinition::new(CourseName::new("A").unwrap(), vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn final_and_core_controls() {
        let course = course("A", &["101", "102", "100"]);
        assert_eq!(course.final_control().as_str(), "100");
        assert_eq!(course.core_controls().len(), 2);
        assert_eq!(course.core_controls()[0].as_str(), "101");
    }

    #[test]
    fn single_control_course_has_empty_core() {
        let course = course("A", &["100"]);
        assert_eq!(course.final_control().as_str(), "100");
        assert!(course.core_controls().is_empty());
    }

    #[test]
    fn course_set_preserves_declaration_order() {
        let set: CourseSet = [course("B", &["108", "100"]), course("A", &["101", "100"])]
            .into_iter()
            .collect();

        let names: Vec<_> = set.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn course_set_lookup_by_name() {
        let mut set = CourseSet::new();
        set.push(course("A", &["101", "100"]));

        assert!(set.get("A").is_some());
        assert!(set.get("B").is_none());
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
    }
}
