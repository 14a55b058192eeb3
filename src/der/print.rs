use crate::der::*;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PrettyPrinterFlag {
    ShowHeader,
}

/// Pretty-print DER values, one line per element
pub struct PrettyDer<'a> {
    obj: &'a DerValue<'a>,
    indent: usize,
    inc: usize,

    flags: Vec<PrettyPrinterFlag>,
}

impl<'a> DerValue<'a> {
    pub fn as_pretty(&'a self, indent: usize, increment: usize) -> PrettyDer<'a> {
        PrettyDer::new(self, Vec::new(), indent, increment)
    }
}

impl<'a> PrettyDer<'a> {
    pub fn new(
        obj: &'a DerValue<'a>,
        flags: Vec<PrettyPrinterFlag>,
        indent: usize,
        increment: usize,
    ) -> Self {
        PrettyDer {
            obj,
            indent,
            inc: increment,
            flags,
        }
    }

    pub fn set_flag(&mut self, flag: PrettyPrinterFlag) {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
    }

    pub fn next_indent<'b>(&self, obj: &'b DerValue<'b>) -> PrettyDer<'b> {
        PrettyDer {
            obj,
            indent: self.indent + self.inc,
            inc: self.inc,
            flags: self.flags.to_vec(),
        }
    }

    fn write_indent(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.indent > 0 {
            write!(f, "{:1$}", " ", self.indent)?;
        }
        Ok(())
    }
}

struct HexSlice<'a>(&'a [u8]);

impl<'a> fmt::Display for HexSlice<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, b) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl<'a> fmt::Debug for PrettyDer<'a> {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indent(f)?;
        if self.flags.contains(&PrettyPrinterFlag::ShowHeader) {
            let pc = if self.obj.is_constructed() { "C" } else { "P" };
            write!(f, "[c:{}, {}, t:{:?}] ", self.obj.class(), pc, self.obj.tag())?;
        };
        match self.obj {
            DerValue::Boolean(b)          => writeln!(f, "Boolean({:?})", b),
            DerValue::Integer(i)          => writeln!(f, "Integer({})", HexSlice(i)),
            DerValue::Oid(v)              => writeln!(f, "OID({})", v),
            DerValue::Null                => writeln!(f, "Null"),
            DerValue::OctetString(v)      => writeln!(f, "OctetString({})", HexSlice(v)),
            DerValue::BitString(b)        => writeln!(f, "BitString({}, {})", b.unused_bits, HexSlice(&b.data)),
            DerValue::PrintableString(s)  => writeln!(f, "PrintableString({:?})", s),
            DerValue::Utf8String(s)       => writeln!(f, "UTF8String({:?})", s),
            DerValue::Ia5String(s)        => writeln!(f, "IA5String({:?})", s),
            DerValue::Direct(o)           => writeln!(f, "Direct({})", HexSlice(o.as_bytes())),
            DerValue::ContextSpecific(c)  => {
                let mode = match c.mode() {
                    TagMode::Explicit => "EXPLICIT",
                    TagMode::Implicit => "IMPLICIT",
                };
                writeln!(f, "ContextSpecific [{}] {} {{", c.tag(), mode)?;
                write!(f, "{:?}", self.next_indent(c.value()))?;
                self.write_indent(f)?;
                writeln!(f, "}}")
            },
            DerValue::Sequence(v)         => {
                writeln!(f, "Sequence[")?;
                for o in v {
                    write!(f, "{:?}", self.next_indent(o))?;
                };
                self.write_indent(f)?;
                writeln!(f, "]")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::borrow::Cow;

    #[test]
    fn test_pretty_print() {
        let d = DerValue::from_seq(vec![
            DerValue::from_int_slice(b"\x01\x00\x01"),
            DerValue::explicit(1, DerValue::Null).unwrap(),
            DerValue::from_seq(vec![DerValue::PrintableString(Cow::Borrowed("abc"))]),
        ]);

        let expected = "\
Sequence[
  Integer(01 00 01)
  ContextSpecific [1] EXPLICIT {
    Null
  }
  Sequence[
    PrintableString(\"abc\")
  ]
]
";
        assert_eq!(format!("{:?}", d.as_pretty(0, 2)), expected);

        let mut pp = d.as_pretty(0, 4);
        pp.set_flag(PrettyPrinterFlag::ShowHeader);
        let s = format!("{:?}", pp);
        assert!(s.starts_with("[c:UNIVERSAL, C, t:Sequence] Sequence[\n"));
        assert!(s.contains("    [c:CONTEXT-SPECIFIC, C, t:"));
        assert!(s.contains("        [c:UNIVERSAL, P, t:Null] Null\n"));
    }
}
