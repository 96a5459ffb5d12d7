/// Creates an [`Options`](crate::record::Options) record from `field => value` pairs, converting
/// each value with [`Value::from`](crate::record::Value).
///
/// ```
/// use record_kit::record;
/// use record_kit::record::Value;
///
/// let options = record! { "mode" => "r", "delimiter" => "|" };
/// assert_eq!(options.get("mode"), Ok(&Value::from("r")));
/// assert!(options.get("mdoe").is_err());
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::record::Options::empty()
    };
    ($($field:expr => $value:expr),+ $(,)?) => {
        $crate::record::Options::new([
            $(($field, $crate::record::Value::from($value))),+
        ])
    };
}
