/// Derives the cache key for a logical operation and its arguments.
///
/// The key is pure and deterministic: the same operation and arguments
/// always produce the same key, so the writer and every reader agree on
/// the slot without coordination. Arguments are order-sensitive and joined
/// with `"::"`, which none of our argument domains (operation names, UUIDs,
/// numeric ids) contain, so distinct arguments yield distinct keys.
pub fn build_key<I, S>(operation: &str, args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut key = String::from(operation);
    for arg in args {
        key.push_str("::");
        key.push_str(arg.as_ref());
    }
    key
}
