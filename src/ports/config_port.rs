//! Configuration access port trait.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    /// Section names present in the source, lowercased.
    fn sections(&self) -> Vec<String>;
    /// Keys present in `section`, lowercased; empty if the section is absent.
    fn keys(&self, section: &str) -> Vec<String>;
}
