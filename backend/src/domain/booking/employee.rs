//! Employee identity attached to an allocation.

use std::fmt;

/// The employee a room is allocated to.
///
/// Content is guarded by the validation pipeline at write time; values read
/// back from persistence are trusted to have passed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Display name of the employee.
    pub name: String,
    /// Contact email address. Presence and length are validated; syntax is
    /// not.
    pub email: String,
}

impl Employee {
    /// Build an employee record from owned or borrowed strings.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::booking::Employee;
    ///
    /// let employee = Employee::new("Grace Hopper", "grace@example.com");
    /// assert_eq!(employee.name, "Grace Hopper");
    /// ```
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
