// Member listing for "target not found" diagnostics

use crate::host::HostType;

fn binding(is_static: bool) -> &'static str {
    if is_static { "static" } else { "instance" }
}

/// Describe a type's declared members, one log line each. Accessor methods
/// (`get_`/`set_`) are folded into the property list.
pub fn describe_type_members(ty: &dyn HostType, label: &str) -> Vec<String> {
    let mut lines = vec![format!(
        "[runtime_patcher] === Members of {} ({}) ===",
        label,
        ty.full_name()
    )];

    lines.push("  Methods:".to_string());
    for m in ty.methods() {
        if m.name.starts_with("get_") || m.name.starts_with("set_") {
            continue;
        }
        lines.push(format!(
            "    [{}] {} {}()",
            binding(m.is_static),
            m.visibility.label(),
            m.name
        ));
    }

    lines.push("  Properties:".to_string());
    for p in ty.properties() {
        lines.push(format!(
            "    [{}] {} : {}",
            binding(p.is_static()),
            p.name,
            p.type_name
        ));
    }

    lines.push("  Fields:".to_string());
    for f in ty.fields() {
        lines.push(format!(
            "    [{}] {} : {}",
            binding(f.is_static),
            f.name,
            f.type_name
        ));
    }

    lines.push(format!("[runtime_patcher] === End {} dump ===", label));
    lines
}
