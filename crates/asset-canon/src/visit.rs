//! visitor helpers for [Value] trees
use crate::value::Value;

/// Visitor that gets mutable access to what it visits
pub trait VisitMut<T> {
    fn visit_mut(&mut self, value: &mut T);
}

impl<T, F> VisitMut<T> for F
where
    F: FnMut(&mut T),
{
    fn visit_mut(&mut self, value: &mut T) {
        self(value)
    }
}

/// Recursively visit all strings mutably, object keys included
pub trait VisitStringsMut {
    fn visit_strings_mut(&mut self, visitor: &mut dyn VisitMut<String>);
}

impl VisitStringsMut for Value {
    fn visit_strings_mut(&mut self, visitor: &mut dyn VisitMut<String>) {
        match self {
            Value::String(s) => visitor.visit_mut(s),
            Value::Array(array) => {
                for value in array {
                    value.visit_strings_mut(visitor);
                }
            }
            Value::Object(object) => {
                // keys can not be changed in place, rebuild in the same order.
                // rewritten keys that collide keep the position of the first and the value of the last
                *object = std::mem::take(object)
                    .into_iter()
                    .map(|(mut key, mut value)| {
                        visitor.visit_mut(&mut key);
                        value.visit_strings_mut(visitor);
                        (key, value)
                    })
                    .collect();
            }
            Value::Null | Value::Boolean(_) | Value::Integer(_) | Value::Decimal(_) => {}
        }
    }
}
