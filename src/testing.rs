//! Shared fixture for unit tests: a small platform module and one bound
//! source file exercising every scanner.

use serde_json::json;

use crate::metadata::{
    AttributePayload, Enumerant, ExternalMember, ExternalType, MemberKind, MetadataModule,
    MetadataNames, TargetContext,
};
use crate::semantic::snapshot::NodeRecord;
use crate::semantic::{NodeId, ProjectSnapshot, SnapshotTree, Symbol, SymbolId, SyntaxKind};

pub const IOS_6_0: u64 = 0x60000;
pub const IOS_7_0: u64 = 0x70000;
pub const IOS_8_0: u64 = 0x80000;

pub const SOURCE: &str = "class Foo : UIViewController
{
    public override void ViewDidUnload() { }
    public override string Title { get; set; }
    public override void ViewDidLoad()
    {
        var sheet = new UIActionSheet();
        var alert = new UIAlertView();
        this.DismissModalViewController(true);
        DismissModalViewController(false);
        var popover = ModalInPopover;
        var sheet2 = ActionSheet;
        MyView custom = null;
        UICustomSheet customSheet = null;
        UIBlurSheet blur = null;
        Plain plain = null;
        UIActionSheet[] sheets = null;
    }
}

class Alpha : UIViewController
{
    public override void ViewDidUnload() { }
}
";

fn availability(version: u64) -> AttributePayload {
    AttributePayload {
        type_name: "ObjCRuntime.AvailabilityAttribute".to_string(),
        fields: [("Deprecated".to_string(), json!(version))].into_iter().collect(),
    }
}

fn member(name: &str, kind: MemberKind, deprecated: Option<u64>) -> ExternalMember {
    ExternalMember {
        name: name.to_string(),
        kind,
        attributes: deprecated.map(availability).into_iter().collect(),
    }
}

fn external(full_name: &str, base: Option<&str>, deprecated: Option<u64>) -> ExternalType {
    ExternalType {
        full_name: full_name.to_string(),
        base: base.map(String::from),
        attributes: deprecated.map(availability).into_iter().collect(),
        members: vec![],
        enumerants: vec![],
    }
}

pub fn fixture_module() -> MetadataModule {
    let mut attribute = external("ObjCRuntime.AvailabilityAttribute", None, None);
    attribute.members = vec![member("Deprecated", MemberKind::Property, None)];

    let mut platform = external("ObjCRuntime.Platform", None, None);
    platform.enumerants = [("None", 0), ("iOS_6_0", IOS_6_0), ("iOS_7_0", IOS_7_0), ("iOS_8_0", IOS_8_0)]
        .into_iter()
        .map(|(name, value)| Enumerant {
            name: name.to_string(),
            value,
        })
        .collect();

    let mut controller = external("UIKit.UIViewController", Some("Foundation.NSObject"), None);
    controller.members = vec![
        member("ViewDidUnload", MemberKind::Method, Some(IOS_6_0)),
        member("DismissModalViewController", MemberKind::Method, Some(IOS_7_0)),
        member("ModalInPopover", MemberKind::Property, Some(IOS_8_0)),
        member("ActionSheet", MemberKind::Property, Some(IOS_6_0)),
        member("Title", MemberKind::Property, Some(0)),
        member("ViewDidLoad", MemberKind::Method, None),
    ];

    // Re-declares members; only one keeps an attribute of its own
    let mut table = external("UIKit.UITableViewController", Some("UIKit.UIViewController"), None);
    table.members = vec![
        member("ViewDidUnload", MemberKind::Method, None),
        member("DismissModalViewController", MemberKind::Method, Some(0)),
    ];

    MetadataModule::new(
        Some("Xamarin.iOS".to_string()),
        vec![
            external("Foundation.NSObject", None, None),
            attribute,
            platform,
            controller,
            table,
            external("UIKit.UIActionSheet", Some("Foundation.NSObject"), Some(IOS_6_0)),
            external("UIKit.UIAlertView", Some("Foundation.NSObject"), Some(IOS_8_0)),
            external("UIKit.UIBlurSheet", Some("UIKit.UIActionSheet"), Some(0)),
            external("UIKit.UICustomSheet", Some("UIKit.UIActionSheet"), None),
        ],
    )
}

pub fn target<'m>(module: &'m MetadataModule, version: &str) -> TargetContext<'m> {
    TargetContext::new(module, &MetadataNames::default(), Some(version)).unwrap()
}

/// Byte offset of the `nth` occurrence of `needle` in the fixture source.
fn find_nth(needle: &str, nth: usize) -> usize {
    SOURCE
        .match_indices(needle)
        .nth(nth)
        .map(|(i, _)| i)
        .unwrap_or_else(|| panic!("{needle:?} #{nth} not in fixture source"))
}

struct NodeDef {
    id: u32,
    kind: &'static str,
    needle: &'static str,
    nth: usize,
    parent: Option<u32>,
    declared: Option<u32>,
    symbol: Option<u32>,
    candidates: &'static [u32],
}

const fn node_at(id: u32, kind: &'static str, needle: &'static str, parent: Option<u32>) -> NodeDef {
    NodeDef {
        id,
        kind,
        needle,
        nth: 0,
        parent,
        declared: None,
        symbol: None,
        candidates: &[],
    }
}

fn nodes() -> Vec<NodeRecord> {
    let defs = [
        NodeDef { declared: Some(10), ..node_at(1, "class_declaration", "class Foo", Some(0)) },
        NodeDef { declared: Some(11), ..node_at(2, "method_declaration", "public override void ViewDidUnload", Some(1)) },
        NodeDef { declared: Some(12), ..node_at(3, "property_declaration", "public override string Title", Some(1)) },
        NodeDef { declared: Some(13), ..node_at(4, "method_declaration", "public override void ViewDidLoad", Some(1)) },
        NodeDef { declared: Some(15), ..node_at(5, "variable_declarator", "sheet = new", Some(4)) },
        NodeDef { symbol: Some(7), ..node_at(6, "identifier_name", "UIActionSheet()", Some(5)) },
        NodeDef { declared: Some(16), ..node_at(7, "variable_declarator", "alert = new", Some(4)) },
        NodeDef { symbol: Some(4), ..node_at(8, "member_access_expression", "this.DismissModalViewController", Some(4)) },
        NodeDef { symbol: Some(4), ..node_at(9, "identifier_name", "DismissModalViewController", Some(8)) },
        node_at(10, "invocation_expression", "DismissModalViewController(false)", Some(4)),
        NodeDef { candidates: &[4, 3], nth: 1, ..node_at(11, "identifier_name", "DismissModalViewController", Some(10)) },
        NodeDef { declared: Some(32), ..node_at(12, "variable_declarator", "popover =", Some(4)) },
        NodeDef { symbol: Some(5), ..node_at(13, "identifier_name", "ModalInPopover;", Some(12)) },
        NodeDef { declared: Some(33), ..node_at(14, "variable_declarator", "sheet2 =", Some(4)) },
        NodeDef { symbol: Some(34), ..node_at(15, "identifier_name", "ActionSheet;", Some(14)) },
        NodeDef { declared: Some(19), ..node_at(16, "variable_declarator", "custom =", Some(4)) },
        NodeDef { declared: Some(31), ..node_at(17, "variable_declarator", "customSheet =", Some(4)) },
        NodeDef { declared: Some(25), ..node_at(18, "variable_declarator", "blur =", Some(4)) },
        NodeDef { declared: Some(26), ..node_at(19, "variable_declarator", "plain =", Some(4)) },
        NodeDef { declared: Some(27), ..node_at(20, "variable_declarator", "sheets =", Some(4)) },
        NodeDef { declared: Some(28), ..node_at(21, "class_declaration", "class Alpha", Some(0)) },
        NodeDef { declared: Some(29), nth: 1, ..node_at(22, "method_declaration", "public override void ViewDidUnload", Some(21)) },
    ];

    let mut nodes = vec![NodeRecord {
        id: NodeId(0),
        kind: SyntaxKind::Other,
        start: 0,
        length: SOURCE.len(),
        parent: None,
        declared: None,
        symbol: None,
        candidates: vec![],
    }];
    for s in defs {
        let kind: SyntaxKind = serde_json::from_value(json!(s.kind)).unwrap();
        nodes.push(NodeRecord {
            id: NodeId(s.id),
            kind,
            start: find_nth(s.needle, s.nth),
            length: s.needle.len(),
            parent: s.parent.map(NodeId),
            declared: s.declared.map(SymbolId),
            symbol: s.symbol.map(SymbolId),
            candidates: s.candidates.iter().copied().map(SymbolId).collect(),
        });
    }
    nodes
}

fn symbols() -> Vec<Symbol> {
    let symbols = json!([
        { "id": 1, "name": "NSObject", "display_name": "Foundation.NSObject", "kind": "named_type", "module": "Xamarin.iOS" },
        { "id": 2, "name": "UIViewController", "display_name": "UIKit.UIViewController", "kind": "named_type", "module": "Xamarin.iOS", "base_type": 1 },
        { "id": 3, "name": "ViewDidUnload", "kind": "method", "module": "Xamarin.iOS", "containing_type": 2 },
        { "id": 4, "name": "DismissModalViewController", "kind": "method", "module": "Xamarin.iOS", "containing_type": 2 },
        { "id": 5, "name": "ModalInPopover", "kind": "property", "module": "Xamarin.iOS", "containing_type": 2 },
        { "id": 6, "name": "Title", "kind": "property", "module": "Xamarin.iOS", "containing_type": 2 },
        { "id": 7, "name": "UIActionSheet", "display_name": "UIKit.UIActionSheet", "kind": "named_type", "module": "Xamarin.iOS", "base_type": 1 },
        { "id": 8, "name": "UIAlertView", "display_name": "UIKit.UIAlertView", "kind": "named_type", "module": "Xamarin.iOS", "base_type": 1 },
        { "id": 9, "name": "UIBlurSheet", "display_name": "UIKit.UIBlurSheet", "kind": "named_type", "module": "Xamarin.iOS", "base_type": 7 },
        { "id": 10, "name": "Foo", "display_name": "App.Foo", "kind": "named_type", "module": "App", "base_type": 2 },
        { "id": 11, "name": "ViewDidUnload", "kind": "method", "module": "App", "containing_type": 10, "is_override": true },
        { "id": 12, "name": "Title", "kind": "property", "module": "App", "containing_type": 10, "is_override": true },
        { "id": 13, "name": "ViewDidLoad", "kind": "method", "module": "App", "containing_type": 10, "is_override": true },
        { "id": 15, "name": "sheet", "kind": "local", "module": "App", "declared_type": 7 },
        { "id": 16, "name": "alert", "kind": "local", "module": "App", "declared_type": 8 },
        { "id": 18, "name": "MyView", "display_name": "App.MyView", "kind": "named_type", "module": "App", "base_type": 7 },
        { "id": 19, "name": "custom", "kind": "local", "module": "App", "declared_type": 18 },
        { "id": 20, "name": "Plain", "display_name": "App.Plain", "kind": "named_type", "module": "App" },
        { "id": 21, "name": "UIActionSheet[]", "kind": "array_type", "module": "App" },
        { "id": 22, "name": "NSObject", "display_name": "App.NSObject", "kind": "named_type", "module": "App" },
        { "id": 23, "name": "Loop1", "kind": "named_type", "module": "App", "base_type": 24 },
        { "id": 24, "name": "Loop2", "kind": "named_type", "module": "App", "base_type": 23 },
        { "id": 25, "name": "blur", "kind": "local", "module": "App", "declared_type": 9 },
        { "id": 26, "name": "plain", "kind": "local", "module": "App", "declared_type": 20 },
        { "id": 27, "name": "sheets", "kind": "local", "module": "App", "declared_type": 21 },
        { "id": 28, "name": "Alpha", "display_name": "App.Alpha", "kind": "named_type", "module": "App", "base_type": 2 },
        { "id": 29, "name": "ViewDidUnload", "kind": "method", "module": "App", "containing_type": 28, "is_override": true },
        { "id": 30, "name": "UICustomSheet", "display_name": "UIKit.UICustomSheet", "kind": "named_type", "module": "Xamarin.iOS", "base_type": 7 },
        { "id": 31, "name": "customSheet", "kind": "local", "module": "App", "declared_type": 30 },
        { "id": 32, "name": "popover", "kind": "local", "module": "App" },
        { "id": 33, "name": "sheet2", "kind": "local", "module": "App", "declared_type": 7 },
        { "id": 34, "name": "ActionSheet", "kind": "property", "module": "Xamarin.iOS", "containing_type": 2 },
        { "id": 40, "name": "UITableViewController", "display_name": "UIKit.UITableViewController", "kind": "named_type", "module": "Xamarin.iOS", "base_type": 2 },
        { "id": 41, "name": "Grid", "display_name": "App.Grid", "kind": "named_type", "module": "App", "base_type": 40 },
        { "id": 42, "name": "ViewDidUnload", "kind": "method", "module": "App", "containing_type": 41, "is_override": true },
        { "id": 43, "name": "DismissModalViewController", "kind": "method", "module": "Xamarin.iOS", "containing_type": 40 }
    ]);
    serde_json::from_value(symbols).unwrap()
}

pub fn fixture_project() -> ProjectSnapshot {
    ProjectSnapshot {
        name: "App".to_string(),
        symbols: symbols().into(),
        trees: vec![SnapshotTree::new("src/App/Foo.cs", SOURCE, nodes())],
    }
}
