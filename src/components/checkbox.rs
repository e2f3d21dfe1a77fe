/// Text of a read-only checkbox cell
pub fn checkbox_label(name: &str, checked: bool) -> String {
    let mark = if checked { 'x' } else { ' ' };
    format!("[{}] {}", mark, name)
}
