// ── Sibling ordering ──

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

use crate::model::Node;

/// Order two siblings for placement.
///
/// Ported siblings sort by port number and ahead of unported ones; the rest
/// sort by kind priority, then natural label order. Ids break exact ties so
/// the result never depends on input order.
pub fn cmp_nodes(a: &Node, b: &Node) -> Ordering {
    match (a.switch_port, b.switch_port) {
        (Some(pa), Some(pb)) => pa.cmp(&pb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a
            .kind
            .priority()
            .cmp(&b.kind.priority())
            .then_with(|| natural_cmp(&a.display_label, &b.display_label)),
    }
    .then_with(|| a.id.cmp(&b.id))
}

/// Case-insensitive comparison treating digit runs as numbers,
/// so `"AP 2"` sorts before `"AP 10"`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let ord = cmp_digit_runs(&take_digits(&mut left), &take_digits(&mut right));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = l.to_lowercase().cmp(r.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DeviceKind;

    fn node(id: &str, kind: DeviceKind, label: &str, port: Option<u32>) -> Node {
        Node {
            id: id.into(),
            serial: None,
            display_label: label.into(),
            model: None,
            kind,
            status: None,
            switch_port: port,
        }
    }

    #[test]
    fn natural_order_is_numeric_aware() {
        let mut labels = vec!["AP 10", "ap 2", "AP 1", "Switch"];
        labels.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(labels, ["AP 1", "ap 2", "AP 10", "Switch"]);
    }

    #[test]
    fn natural_order_ignores_leading_zeros_and_case() {
        assert_eq!(natural_cmp("port007", "PORT7"), Ordering::Equal);
        assert_eq!(natural_cmp("rack", "rack2"), Ordering::Less);
    }

    #[test]
    fn ported_siblings_order_by_port_only() {
        let a = node("a", DeviceKind::Device, "zzz", Some(3));
        let b = node("b", DeviceKind::Switch, "aaa", Some(11));
        assert_eq!(cmp_nodes(&a, &b), Ordering::Less);
    }

    #[test]
    fn ported_sibling_sorts_before_unported() {
        let ported = node("p", DeviceKind::Device, "zzz", Some(48));
        let plain = node("q", DeviceKind::Switch, "aaa", None);
        assert_eq!(cmp_nodes(&ported, &plain), Ordering::Less);
        assert_eq!(cmp_nodes(&plain, &ported), Ordering::Greater);
    }

    #[test]
    fn unported_siblings_order_by_kind_then_label() {
        let sw = node("1", DeviceKind::Switch, "Zeta", None);
        let ap2 = node("2", DeviceKind::Ap, "AP 2", None);
        let ap10 = node("3", DeviceKind::Ap, "AP 10", None);
        let mut v = vec![&ap10, &sw, &ap2];
        v.sort_by(|a, b| cmp_nodes(a, b));
        let ids: Vec<&str> = v.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }
}
