// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_list_outline(breadth: usize, depth: usize) -> String {
    let mut content = String::new();
    push_list_level(&mut content, breadth, depth, 0, "Item");
    content
}

#[allow(dead_code)]
fn push_list_level(out: &mut String, breadth: usize, remaining: usize, level: usize, label: &str) {
    if remaining == 0 {
        return;
    }
    let indent = "  ".repeat(level);
    for i in 0..breadth {
        let text = format!("{label} {i}");
        out.push_str(&format!("{indent}- {text}\n"));
        push_list_level(out, breadth, remaining - 1, level + 1, &text);
    }
}

#[allow(dead_code)]
pub fn generate_heading_outline(sections: usize, subsections: usize) -> String {
    let mut content = String::from("# Document\n\nIntroduction paragraph.\n\n");
    for section in 0..sections {
        content.push_str(&format!("## Section {section}\n\nSection notes go here.\n\n"));
        for sub in 0..subsections {
            content.push_str(&format!(
                "### Subsection {section}.{sub}\n\nSome detail with *emphasis*.\n- bullet in a note\n\n"
            ));
        }
    }
    content
}
