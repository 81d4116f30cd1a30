use super::{directive, strip_link_role, target_label, Directive};

#[test]
fn test_target_label() {
    assert_eq!(target_label("(install)="), Some("install"));
    assert_eq!(target_label("  (guide-intro)=  "), Some("guide-intro"));
    assert_eq!(target_label("()="), None);
    assert_eq!(target_label("(two words)="), None);
    assert_eq!(target_label("(install)"), None);
    assert_eq!(target_label("see (install)="), None);
}

#[test]
fn test_directive_names() {
    assert_eq!(directive("{abstract}"), Some(Directive::Abstract));
    assert_eq!(
        directive("{rubric} Further reading"),
        Some(Directive::Rubric("Further reading"))
    );
    assert_eq!(directive("{note}"), Some(Directive::Other("note")));
    assert_eq!(directive("rust"), None, "Plain languages are not directives");
    assert_eq!(directive(""), None);
}

#[test]
fn test_strip_link_role() {
    assert_eq!(strip_link_role("See {link}"), Some("See "));
    assert_eq!(strip_link_role("{link}"), Some(""));
    assert_eq!(strip_link_role("See {ref}"), None);
    assert_eq!(strip_link_role("See "), None);
}
