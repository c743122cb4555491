/// `std::any::type_name` with module paths stripped from every segment, so
/// `stripe_rs::list::List<stripe_rs::resources::customer::Customer>` becomes
/// `List<Customer>`.
pub(crate) fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let mut short = String::with_capacity(full.len());
    let mut segment_start = 0;
    for (i, c) in full.char_indices() {
        if matches!(c, '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&') {
            short.push_str(last_path_segment(&full[segment_start..i]));
            short.push(c);
            segment_start = i + c.len_utf8();
        }
    }
    short.push_str(last_path_segment(&full[segment_start..]));
    short
}

fn last_path_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_nested_paths() {
        assert_eq!(short_type_name::<String>(), "String");
        assert_eq!(
            short_type_name::<Vec<std::collections::BTreeMap<String, u8>>>(),
            "Vec<BTreeMap<String, u8>>"
        );
        assert_eq!(short_type_name::<Option<&str>>(), "Option<&str>");
    }
}
