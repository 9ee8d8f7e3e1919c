//! Netlist reading and the flattened component list.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use super::node_map::NodeMap;
use super::subcircuit::SubcircuitTable;
use super::types::{ComponentId, NodeId};
use crate::components::{Category, Component, ComponentKind};
use crate::dsl::{self, CommandLine, Dialect, Record};
use crate::error::{Result, SymnaError};
use crate::mna::{self, MnaSystem, NetworkState};

/// Options for reading a netlist.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Dialect in effect at the start of the input.
    pub dialect: Dialect,
    /// Keep comment and command lines, including those inside subcircuit
    /// bodies, as they are read (see [`Netlist::echoed`]).
    pub echo: bool,
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting dialect.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Enable or disable echoing of non-topology lines.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }
}

/// A flattened netlist.
///
/// Reading a file parses it, expands every subcircuit instance and
/// registers every net with the node map. The netlist is valid only if the
/// whole input parsed and every instance resolved; only a valid netlist can
/// be assembled into a symbolic MNA system.
#[derive(Debug, Default)]
pub struct Netlist {
    components: Vec<Component>,
    node_map: NodeMap,
    commands: Vec<CommandLine>,
    /// Recoverable problems (dropped components, replaced definitions)
    diagnostics: Vec<SymnaError>,
    echoed: Vec<String>,
    comment_count: usize,
    subcircuit_count: usize,
    valid: bool,
}

impl Netlist {
    /// Create an empty, not yet valid netlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read netlist text with default options.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, &ReadOptions::default())
    }

    /// Read netlist text.
    pub fn parse_with(text: &str, options: &ReadOptions) -> Result<Self> {
        let mut netlist = Self::new();
        netlist.read_str(text, options)?;
        Ok(netlist)
    }

    /// Read a netlist file.
    pub fn from_file(path: impl AsRef<Path>, options: &ReadOptions) -> Result<Self> {
        let mut netlist = Self::new();
        netlist.read_file(path, options)?;
        Ok(netlist)
    }

    /// Replace the contents of this netlist with the file at `path`.
    ///
    /// A missing or unreadable file leaves the netlist invalid and is not parsed.
    pub fn read_file(&mut self, path: impl AsRef<Path>, options: &ReadOptions) -> Result<()> {
        let path = path.as_ref();
        *self = Self::new();
        let text = fs::read_to_string(path).map_err(|e| SymnaError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        self.read_str(&text, options)
    }

    /// Replace the contents of this netlist with `text`.
    ///
    /// On error the netlist is left invalid.
    pub fn read_str(&mut self, text: &str, options: &ReadOptions) -> Result<()> {
        *self = Self::new();
        let records = dsl::parse(text, options.dialect)?;
        self.process(records, options)?;
        self.valid = true;
        debug!(
            "read {} components on {} nodes ({} commands, {} comments, {} subcircuits)",
            self.components.len(),
            self.node_count(),
            self.commands.len(),
            self.comment_count,
            self.subcircuit_count
        );
        Ok(())
    }

    /// Flatten the records into components, registering definitions as
    /// they appear and expanding instances against them.
    fn process(&mut self, records: Vec<Record>, options: &ReadOptions) -> Result<()> {
        let mut table = SubcircuitTable::new();

        for record in records {
            match record {
                Record::Component(line) => match Component::from_line(&line) {
                    Ok(component) => self.add_component(component),
                    Err(e) if e.is_recoverable() => {
                        warn!("{}", e);
                        self.diagnostics.push(e);
                    }
                    Err(e) => return Err(e),
                },
                Record::Command(command) => {
                    self.echo(options, &command.text);
                    self.commands.push(command);
                }
                Record::Comment(comment) => {
                    self.echo(options, &comment.text);
                    self.comment_count += 1;
                }
                Record::Subcircuit(def) => {
                    for line in &def.body {
                        match line {
                            Record::Command(command) => self.echo(options, &command.text),
                            Record::Comment(comment) => {
                                self.echo(options, &comment.text);
                                self.comment_count += 1;
                            }
                            _ => {}
                        }
                    }
                    if let Some(replaced) = table.register(def) {
                        self.diagnostics.push(replaced);
                    }
                    self.subcircuit_count += 1;
                }
                Record::Instance(instance) => {
                    let expansion = table.instantiate(&instance)?;
                    self.diagnostics.extend(expansion.diagnostics);
                    for component in expansion.components {
                        self.add_component(component);
                    }
                }
            }
        }
        Ok(())
    }

    fn echo(&mut self, options: &ReadOptions, text: &str) {
        if options.echo {
            info!("{}", text);
            self.echoed.push(text.to_string());
        }
    }

    fn add_component(&mut self, mut component: Component) {
        component.resolve_nodes(&mut self.node_map);
        self.components.push(component);
    }

    /// Whether the last read succeeded.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Flattened components in netlist order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.0)
    }

    /// Position of the component named `name`.
    pub fn find_component(&self, name: &str) -> Option<ComponentId> {
        self.components.iter().position(|c| c.name() == name).map(ComponentId)
    }

    pub fn node_map(&self) -> &NodeMap {
        &self.node_map
    }

    /// Number of non-ground nodes.
    pub fn node_count(&self) -> usize {
        self.node_map.node_count()
    }

    /// Index of a net; fails if the net was never seen.
    pub fn find_node(&self, name: &str) -> Result<NodeId> {
        self.node_map.find(name)
    }

    /// Name of the net at `id`.
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.node_map.name(id)
    }

    /// Components of one kind.
    pub fn devices(&self, kind: ComponentKind) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(move |c| c.kind() == kind)
    }

    pub fn number_of_devices(&self, kind: ComponentKind) -> usize {
        self.devices(kind).count()
    }

    /// Resistors, capacitors and inductors.
    pub fn number_of_impedances(&self) -> usize {
        self.components
            .iter()
            .filter(|c| c.kind().category() == Some(Category::Impedance))
            .count()
    }

    pub fn number_of_voltage_sources(&self) -> usize {
        self.number_of_devices(ComponentKind::VoltageSource)
    }

    /// Command lines in input order, including dialect switches.
    pub fn commands(&self) -> &[CommandLine] {
        &self.commands
    }

    /// Recoverable problems reported during the last read.
    pub fn diagnostics(&self) -> &[SymnaError] {
        &self.diagnostics
    }

    /// Comment and command lines kept by the last read when echo was on.
    pub fn echoed(&self) -> &[String] {
        &self.echoed
    }

    pub fn comment_count(&self) -> usize {
        self.comment_count
    }

    /// Per-category counts for the flattened components.
    pub fn network_state(&self) -> NetworkState {
        NetworkState::from_components(self.node_count(), &self.components)
    }

    /// Dimension of the symbolic system: nodes plus auxiliary unknowns.
    pub fn full_size(&self) -> usize {
        self.network_state().full_size()
    }

    /// Names of all symbols used as component values.
    pub fn symbols(&self) -> BTreeSet<&str> {
        self.components.iter().flat_map(|c| c.value().symbols()).collect()
    }

    /// Labels of all unknowns in matrix order.
    pub fn unknown_names(&self) -> Result<Vec<String>> {
        mna::unknown_names(&self.components, &self.node_map)
    }

    /// Assign offsets and stamp every component into a symbolic matrix.
    pub fn assemble(&self) -> Result<MnaSystem> {
        if !self.valid {
            return Err(SymnaError::InvalidNetlist);
        }
        mna::assemble(&self.components, &self.node_map)
    }
}

impl fmt::Display for Netlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for component in &self.components {
            writeln!(f, "{}", component)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::Expr;

    #[test]
    fn test_divider_scenario() {
        let netlist = Netlist::parse("R1 a b 100\nV1 a 0 5\n").unwrap();
        assert!(netlist.is_valid());

        assert_eq!(netlist.find_node("0").unwrap(), NodeId::GROUND);
        assert_eq!(netlist.find_node("a").unwrap(), NodeId(1));
        assert_eq!(netlist.find_node("b").unwrap(), NodeId(2));
        assert_eq!(netlist.node_count(), 2);
        assert_eq!(netlist.full_size(), 4);

        let system = netlist.assemble().unwrap();
        assert_eq!(system.offsets(), &[Some(3), Some(4)]);
        assert_eq!(system.matrix().get(3, 1), Some(&Expr::Num(100.0)));
        assert_eq!(system.matrix().get(4, 1), Some(&Expr::one()));
    }

    #[test]
    fn test_ground_aliases() {
        let netlist = Netlist::parse("R1 a 0 1\nR2 a GND 1\nR3 a Gnd 1\nR4 a gnd 1\n").unwrap();
        assert_eq!(netlist.node_count(), 1);
        for c in netlist.components() {
            assert_eq!(c.node_ids()[1], NodeId::GROUND);
        }
    }

    #[test]
    fn test_distinct_names_get_distinct_indices() {
        let netlist = Netlist::parse("R1 a b 1\nR2 b c 1\nR3 c a 1\nC1 x y C\n").unwrap();
        let ids: BTreeSet<NodeId> = ["a", "b", "c", "x", "y"]
            .iter()
            .map(|n| netlist.find_node(n).unwrap())
            .collect();
        assert_eq!(ids.len(), 5);
        assert!(!ids.contains(&NodeId::GROUND));
        assert_eq!(netlist.node_name(NodeId(4)), Some("x"));
    }

    #[test]
    fn test_subcircuit_scenario() {
        let netlist = Netlist::parse(".subckt DIV in out 2\nR1 in out 1k\n.ends\nX1 n1 n2 DIV\n").unwrap();
        assert_eq!(netlist.components().len(), 1);
        let r = &netlist.components()[0];
        assert_eq!(r.name(), "X1/R1");
        assert_eq!(r.nodes(), &["n1", "n2"]);
        assert!(netlist.find_node("DIV:in").is_err());
        assert!(netlist.find_node("X1:in").is_err());
    }

    #[test]
    fn test_two_instances() {
        let input = "\
.subckt STAGE in out
R1 in mid R
C1 mid out C
R2 mid vdd! Rb
.ends
X1 a b STAGE
X2 b c STAGE
";
        let netlist = Netlist::parse(input).unwrap();
        let mid1 = netlist.find_node("X1:mid").unwrap();
        let mid2 = netlist.find_node("X2:mid").unwrap();
        assert_ne!(mid1, mid2);

        let supply: Vec<NodeId> = netlist
            .components()
            .iter()
            .filter(|c| c.name().ends_with("/R2"))
            .map(|c| c.node_ids()[1])
            .collect();
        assert_eq!(supply.len(), 2);
        assert_eq!(supply[0], supply[1]);
        assert_eq!(netlist.number_of_impedances(), 6);
    }

    #[test]
    fn test_undefined_subcircuit_invalidates() {
        let mut netlist = Netlist::new();
        let err = netlist.read_str("R1 a 0 1\nX1 a 0 NOPE\n", &ReadOptions::default()).unwrap_err();
        assert!(matches!(err, SymnaError::UnknownSubcircuit { .. }));
        assert!(!netlist.is_valid());
        assert!(netlist.components().iter().all(|c| !c.name().starts_with("X1/")));
        assert!(matches!(netlist.assemble(), Err(SymnaError::InvalidNetlist)));
    }

    #[test]
    fn test_unknown_kind_is_dropped() {
        let netlist = Netlist::parse("R1 a b 1\nQ a b 1\nC1 b 0 C\n").unwrap();
        assert!(netlist.is_valid());
        assert_eq!(netlist.components().len(), 2);
        assert_eq!(netlist.components()[1].name(), "C1");
        assert_eq!(netlist.diagnostics().len(), 1);
        assert!(matches!(
            netlist.diagnostics()[0],
            SymnaError::UnknownComponentKind { kind: 'Q', line: 2, .. }
        ));
    }

    #[test]
    fn test_grammar_failure_invalidates() {
        let mut netlist = Netlist::new();
        let result = netlist.read_str("R1 a b 1\nR2 a b\n", &ReadOptions::default());
        assert!(matches!(result, Err(SymnaError::Grammar { ref remainder, .. }) if remainder == "R2 a b\n"));
        assert!(!netlist.is_valid());
    }

    #[test]
    fn test_missing_file() {
        let mut netlist = Netlist::new();
        let err = netlist
            .read_file("/nonexistent/symna/netlist.sp", &ReadOptions::default())
            .unwrap_err();
        assert!(matches!(err, SymnaError::FileReadError { .. }));
        assert!(!netlist.is_valid());
    }

    #[test]
    fn test_full_size_mix() {
        let input = "\
V1 in 0 Vin
R1 in a R1
O1 0 a out 1
E1 x 0 a 0 A
F1 y 0 out 0 rm
G1 z 0 a 0 gm
H1 w 0 x 0 beta
I1 w 0 1m
";
        let netlist = Netlist::parse(input).unwrap();
        let aux: usize = netlist.components().iter().map(|c| c.mna_size()).sum();
        assert_eq!(aux, 1 + 1 + 1 + 1 + 2 + 0 + 1 + 0);
        assert_eq!(netlist.full_size(), netlist.node_count() + aux);

        let system = netlist.assemble().unwrap();
        assert_eq!(system.full_size(), netlist.full_size());
        assert_eq!(netlist.unknown_names().unwrap(), system.unknowns());
    }

    #[test]
    fn test_queries() {
        let input = "* header\n.options x\nR1 a b R\nR2 b 0 2k\nV1 a 0 Vs\n";
        let netlist = Netlist::parse_with(input, &ReadOptions::new().with_echo(true)).unwrap();
        assert_eq!(netlist.number_of_devices(ComponentKind::Resistor), 2);
        assert_eq!(netlist.number_of_voltage_sources(), 1);
        assert_eq!(netlist.commands().len(), 1);
        assert_eq!(netlist.comment_count(), 1);
        assert_eq!(netlist.symbols().into_iter().collect::<Vec<_>>(), vec!["R", "Vs"]);
        assert_eq!(netlist.find_component("V1"), Some(ComponentId(2)));
        assert_eq!(netlist.to_string(), "R1 a b R\nR2 b 0 2000\nV1 a 0 Vs\n");
        assert_eq!(netlist.echoed(), &["* header", ".options x"]);
    }

    #[test]
    fn test_echo_includes_subcircuit_body() {
        let input = "* top\n.subckt A a\n* inside\n.param g=1\nR1 a 0 1\n.ends\nX1 n A\n.end\n";
        let quiet = Netlist::parse(input).unwrap();
        assert!(quiet.echoed().is_empty());
        assert_eq!(quiet.comment_count(), 2);

        let netlist = Netlist::parse_with(input, &ReadOptions::new().with_echo(true)).unwrap();
        assert_eq!(netlist.echoed(), &["* top", "* inside", ".param g=1", ".end"]);
        assert_eq!(netlist.commands().len(), 1);
    }

    #[test]
    fn test_redefined_subcircuit_replaces_earlier() {
        let input = ".subckt A a\nR1 a 0 1\n.ends\n.subckt A a\nR1 a 0 2\n.ends\nX1 n A\n";
        let netlist = Netlist::parse(input).unwrap();
        assert!(netlist.is_valid());
        assert_eq!(netlist.components().len(), 1);
        assert_eq!(netlist.components()[0].value(), &Expr::Num(2.0));
        assert_eq!(netlist.diagnostics().len(), 1);
        assert!(matches!(
            netlist.diagnostics()[0],
            SymnaError::DuplicateSubcircuit { ref name, first_line: 1 } if name == "A"
        ));
    }

    #[test]
    fn test_ground_inside_subcircuit() {
        let input = ".subckt T a\nR1 a gnd 1\nC1 a 0 C\n.ends\nX1 n T\n";
        let netlist = Netlist::parse(input).unwrap();
        assert_eq!(netlist.node_count(), 1);
        for c in netlist.components() {
            assert_eq!(c.node_ids(), &[NodeId(1), NodeId::GROUND]);
        }
        assert!(netlist.find_node("X1:gnd").is_err());
        assert!(netlist.find_node("X1:0").is_err());
    }

    #[test]
    fn test_self_loop_resistor_cancels() {
        let netlist = Netlist::parse("R1 a a R\n").unwrap();
        let system = netlist.assemble().unwrap();
        let m = system.matrix();
        assert_eq!(m.get(2, 1), None);
        assert_eq!(m.get(1, 2), None);
        assert_eq!(m.get(2, 2), Some(&Expr::Num(-1.0)));
        assert_eq!(m.nnz(), 1);
    }

    #[test]
    fn test_spectre_start() {
        let input = "// spectre\nsubckt inv (a y)\nR1 a y r\nends inv\nI0 (p q) inv\n";
        let options = ReadOptions::new().with_dialect(Dialect::Spectre);
        let netlist = Netlist::parse_with(input, &options).unwrap();
        assert_eq!(netlist.components()[0].name(), "I0/R1");
        assert_eq!(netlist.components()[0].nodes(), &["p", "q"]);
    }

    #[test]
    fn test_reread_resets_state() {
        let mut netlist = Netlist::parse("R1 a b 1\n").unwrap();
        netlist.read_str("C1 x 0 C\n", &ReadOptions::default()).unwrap();
        assert_eq!(netlist.components().len(), 1);
        assert!(netlist.find_node("a").is_err());
        assert_eq!(netlist.find_node("x").unwrap(), NodeId(1));
    }
}
