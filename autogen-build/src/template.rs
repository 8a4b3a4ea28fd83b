//! Placeholder expansion.

use crate::conf::Conf;

/// Expanded template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Text with all known placeholders replaced.
    pub text: String,
    /// Number of placeholders replaced.
    pub replacements: usize,
}

/// Replaces each `$KEY$` in `text` by the value of `KEY` from the configuration.
///
/// Placeholders naming unknown keys are left as they are and substituted
/// values are not expanded again.
pub fn expand(text: &str, conf: &Conf) -> Expansion {
    let mut out = String::with_capacity(text.len());
    let mut replacements = 0;
    let mut rest = text;

    while let Some(start) = rest.find('$') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let placeholder = after.find('$').map(|end| &after[..end]);
        match placeholder.and_then(|key| conf.get(key).map(|value| (key, value))) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &after[key.len() + 1..];
                replacements += 1;
            }
            None => {
                out.push('$');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    Expansion { text: out, replacements }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conf(entries: &[(&str, &str)]) -> Conf {
        let mut conf = Conf::new();
        for (k, v) in entries {
            conf.set(*k, *v);
        }
        conf
    }

    #[test]
    fn replaces_known_placeholder() {
        let exp = expand("#define NAME \"$NAME$\"\n", &conf(&[("NAME", "foo")]));
        assert_eq!(exp.text, "#define NAME \"foo\"\n");
        assert_eq!(exp.replacements, 1);
    }

    #[test]
    fn replaces_every_occurrence() {
        let exp = expand("$V$.$V$.$W$", &conf(&[("V", "1"), ("W", "2")]));
        assert_eq!(exp.text, "1.1.2");
        assert_eq!(exp.replacements, 3);
    }

    #[test]
    fn leaves_unknown_placeholders() {
        let exp = expand("a $UNKNOWN$ b", &conf(&[("NAME", "foo")]));
        assert_eq!(exp.text, "a $UNKNOWN$ b");
        assert_eq!(exp.replacements, 0);
    }

    #[test]
    fn does_not_expand_substituted_values() {
        let exp = expand("$A$", &conf(&[("A", "$B$"), ("B", "nested")]));
        assert_eq!(exp.text, "$B$");
    }

    #[test]
    fn stray_dollar_signs() {
        let c = conf(&[("X", "x")]);
        assert_eq!(expand("$", &c).text, "$");
        assert_eq!(expand("$$", &c).text, "$$");
        assert_eq!(expand("cost $5 $X$", &c).text, "cost $5 x");
        assert_eq!(expand("$Y$X$", &c).text, "$Yx");
    }

    #[test]
    fn unicode_text() {
        let exp = expand("ä$N$ö", &conf(&[("N", "ü")]));
        assert_eq!(exp.text, "äüö");
    }
}
