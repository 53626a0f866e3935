//! Expression printers.

use jacgen_ir::{LiteralStyle, Node};

/// Renders a [`Node`] tree as source text.
pub trait ExprPrinter {
    /// Append the rendering of `node` to `out`.
    fn write_node(&self, out: &mut String, node: &Node);

    /// Render `node` into a fresh string.
    fn print(&self, node: &Node) -> String {
        let mut out = String::new();
        self.write_node(&mut out, node);
        out
    }
}

/// C++ printer targeting `DualVar` arithmetic.
///
/// The same printer serves both the host and the CUDA path; only the
/// surrounding routine differs.
#[derive(Clone, Debug)]
pub struct CxxPrinter {
    /// Name of the input vector.
    pub input: String,
    /// Name of the accumulation loop counter.
    pub counter: String,
}

impl Default for CxxPrinter {
    fn default() -> Self {
        Self {
            input: "x".into(),
            counter: "j".into(),
        }
    }
}

impl CxxPrinter {
    fn write_joined(&self, out: &mut String, nodes: &[Node], sep: &str) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                out.push_str(sep);
            }
            self.write_node(out, node);
        }
    }
}

impl ExprPrinter for CxxPrinter {
    fn write_node(&self, out: &mut String, node: &Node) {
        match node {
            Node::Var(i) => {
                out.push_str(&format!("{}[{}]", self.input, i));
            }
            Node::Literal { value, style } => out.push_str(&format_literal(*value, *style)),
            Node::Modulation => {
                out.push_str(&format!("static_cast<double>({} % 10)", self.counter));
            }
            Node::Call(intrinsic, arg) => {
                out.push_str(intrinsic.name());
                out.push('(');
                self.write_node(out, arg);
                out.push(')');
            }
            Node::Binary(op, lhs, rhs) => {
                self.write_node(out, lhs);
                out.push(' ');
                out.push_str(op.symbol());
                out.push(' ');
                self.write_node(out, rhs);
            }
            Node::Group(inner) => {
                out.push('(');
                self.write_node(out, inner);
                out.push(')');
            }
            Node::Product(factors) => self.write_joined(out, factors, " * "),
            Node::Sum(terms) => self.write_joined(out, terms, " + "),
        }
    }
}

/// Format a literal so the C++ compiler reads it as a `double`.
pub fn format_literal(value: f64, style: LiteralStyle) -> String {
    match style {
        LiteralStyle::Fixed(decimals) => format!("{:.*}", decimals as usize, value),
        LiteralStyle::Shortest => {
            let text = format!("{}", value);
            if text.chars().all(|c| c.is_ascii_digit() || c == '-') {
                format!("{}.0", text)
            } else {
                text
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jacgen_ir::{BinaryOp, Coefficient, Expression, Term, UnaryFn};

    fn print_term(term: Term) -> String {
        CxxPrinter::default().print(&term.lower())
    }

    #[test]
    fn fixed_literals_round() {
        assert_eq!(format_literal(0.27345, LiteralStyle::Fixed(3)), "0.273");
        assert_eq!(format_literal(0.0129, LiteralStyle::Fixed(4)), "0.0129");
        assert_eq!(format_literal(1.0, LiteralStyle::Fixed(1)), "1.0");
    }

    #[test]
    fn shortest_literals_roundtrip() {
        assert_eq!(format_literal(0.1, LiteralStyle::Shortest), "0.1");
        assert_eq!(
            format_literal(0.005555555555555556, LiteralStyle::Shortest),
            "0.005555555555555556"
        );
        assert_eq!(format_literal(2.0, LiteralStyle::Shortest), "2.0");
    }

    #[test]
    fn unary_sqrt_rendering() {
        let text = print_term(Term::Unary {
            function: UnaryFn::SqrtSafe,
            variable: 1,
            coefficient: Coefficient::new(0.2, 3),
        });
        assert_eq!(
            text,
            "sqrt(x[1] * x[1] + 0.01) * static_cast<double>(j % 10) * 0.200"
        );
    }

    #[test]
    fn unary_log_and_exp_rendering() {
        let log = print_term(Term::Unary {
            function: UnaryFn::LogSafe,
            variable: 0,
            coefficient: Coefficient::new(0.1, 3),
        });
        assert_eq!(
            log,
            "log(x[0] * x[0] + 1.0) * static_cast<double>(j % 10) * 0.100"
        );
        let exp = print_term(Term::Unary {
            function: UnaryFn::ExpSafe,
            variable: 2,
            coefficient: Coefficient::new(0.15, 3),
        });
        assert_eq!(exp, "exp(x[2] * 0.1) * static_cast<double>(j % 10) * 0.150");
    }

    #[test]
    fn plain_unary_rendering() {
        let text = print_term(Term::Unary {
            function: UnaryFn::Abs,
            variable: 3,
            coefficient: Coefficient::new(0.292, 3),
        });
        assert_eq!(text, "abs(x[3]) * static_cast<double>(j % 10) * 0.292");
    }

    #[test]
    fn binary_rendering() {
        let text = print_term(Term::Binary {
            op: BinaryOp::Mul,
            lhs: 3,
            rhs: 7,
            coefficient: Coefficient::new(0.0201, 4),
        });
        assert_eq!(text, "(x[3] * x[7]) * static_cast<double>(j % 10) * 0.0201");
    }

    #[test]
    fn product_rendering() {
        let text = print_term(Term::Product {
            variables: vec![1, 8, 4],
            coefficient: Coefficient::new(0.0232, 4),
        });
        assert_eq!(
            text,
            "(x[1] * x[8] * x[4]) * static_cast<double>(j % 10) * 0.0232"
        );
    }

    #[test]
    fn expression_joins_with_plus() {
        let c = Coefficient::new(0.25, 3);
        let expr = Expression::new(vec![
            Term::Binary {
                op: BinaryOp::Sub,
                lhs: 0,
                rhs: 1,
                coefficient: c,
            },
            Term::Bookkeeping { coefficient: c },
        ]);
        assert_eq!(
            CxxPrinter::default().print(&expr.lower()),
            "(x[0] - x[1]) * static_cast<double>(j % 10) * 0.250 + static_cast<double>(j % 10) * 0.25"
        );
    }

    #[test]
    fn custom_names() {
        let printer = CxxPrinter {
            input: "u".into(),
            counter: "k".into(),
        };
        let node = jacgen_ir::Node::Product(vec![jacgen_ir::Node::Var(0), jacgen_ir::Node::Modulation]);
        assert_eq!(printer.print(&node), "u[0] * static_cast<double>(k % 10)");
    }
}
