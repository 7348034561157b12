use smol_str::SmolStr;

pub trait IntoNames {
    fn into_names(self) -> Vec<SmolStr>;
}

impl IntoNames for () {
    fn into_names(self) -> Vec<SmolStr> {
        Vec::new()
    }
}

impl IntoNames for &str {
    fn into_names(self) -> Vec<SmolStr> {
        vec![SmolStr::new(self)]
    }
}

impl IntoNames for String {
    fn into_names(self) -> Vec<SmolStr> {
        vec![SmolStr::new(self)]
    }
}

impl IntoNames for SmolStr {
    fn into_names(self) -> Vec<SmolStr> {
        vec![self]
    }
}

impl<const N: usize> IntoNames for [&str; N] {
    fn into_names(self) -> Vec<SmolStr> {
        self.iter().map(SmolStr::new).collect()
    }
}

impl<const N: usize> IntoNames for [String; N] {
    fn into_names(self) -> Vec<SmolStr> {
        self.iter().map(SmolStr::new).collect()
    }
}

impl IntoNames for &[&str] {
    fn into_names(self) -> Vec<SmolStr> {
        self.iter().map(SmolStr::new).collect()
    }
}

impl IntoNames for Vec<&str> {
    fn into_names(self) -> Vec<SmolStr> {
        self.into_iter().map(SmolStr::new).collect()
    }
}

impl IntoNames for Vec<String> {
    fn into_names(self) -> Vec<SmolStr> {
        self.into_iter().map(SmolStr::from).collect()
    }
}

impl IntoNames for Vec<SmolStr> {
    fn into_names(self) -> Vec<SmolStr> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<T: IntoNames>(value: T) -> Vec<SmolStr> {
        value.into_names()
    }

    #[test]
    fn test_into_names() {
        assert!(names(()).is_empty());
        assert_eq!(vec!["id"], names("id"));
        assert_eq!(vec!["id", "name"], names(["id", "name"]));
        assert_eq!(vec!["a"], names(vec![String::from("a")]));
        assert_eq!(vec!["a", "b"], names(&["a", "b"][..]));
    }
}
