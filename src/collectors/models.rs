//! Apple board codes and their marketing names

use crate::data::HardwareNode;

/// One known board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDef {
    pub model: &'static str,
    pub name: &'static str,
    /// Icon hint, empty when none
    pub icon: &'static str,
}

const fn def(model: &'static str, name: &'static str, icon: &'static str) -> ModelDef {
    ModelDef { model, name, icon }
}

/// Matched first to last; some boards claim compatibility with several
/// codes, so keep more specific entries ahead of broader ones.
pub static APPLE_MODELS: &[ModelDef] = &[
    def("AAPL,8500", "PowerMac 8500/8600", ""),
    def("AAPL,9500", "PowerMac 9500/9600", ""),
    def("AAPL,7200", "PowerMac 7200", ""),
    def("AAPL,7300", "PowerMac 7200/7300", ""),
    def("AAPL,7500", "PowerMac 7500", ""),
    def("AAPL,ShinerESB", "Apple Network Server", ""),
    def("AAPL,e407", "Alchemy", ""),
    def("AAPL,e411", "Gazelle", ""),
    def("AAPL,3400/2400", "PowerBook 3400", "laptop"),
    def("AAPL,3500", "PowerBook 3500", "laptop"),
    def("AAPL,Gossamer", "PowerMac G3 (Gossamer)", ""),
    def("AAPL,PowerMac G3", "PowerMac G3 (Silk)", ""),
    def("AAPL,PowerBook1998", "PowerBook Wallstreet", "laptop"),
    def("iMac,1", "iMac (first generation)", ""),
    def("PowerMac1,1", "Blue & White G3", "powermac"),
    def("PowerMac1,2", "PowerMac G4 PCI Graphics", "powermac"),
    def("PowerMac2,1", "iMac FireWire", ""),
    def("PowerMac2,2", "iMac FireWire", ""),
    def("PowerMac3,1", "PowerMac G4 AGP Graphics", "powermac"),
    def("PowerMac3,2", "PowerMac G4 AGP Graphics", "powermac"),
    def("PowerMac3,3", "PowerMac G4 AGP Graphics", "powermac"),
    def("PowerMac3,4", "PowerMac G4 QuickSilver", "powermac"),
    def("PowerMac3,5", "PowerMac G4 QuickSilver", "powermac"),
    def("PowerMac3,6", "PowerMac G4 Windtunnel", "powermac"),
    def("PowerMac4,1", "iMac \"Flower Power\"", ""),
    def("PowerMac4,2", "iMac LCD 15\"", ""),
    def("PowerMac4,4", "eMac", ""),
    def("PowerMac4,5", "iMac LCD 17\"", ""),
    def("PowerMac5,1", "PowerMac G4 Cube", ""),
    def("PowerMac5,2", "PowerMac G4 Cube", ""),
    def("PowerMac6,1", "iMac LCD 17\"", ""),
    def("PowerMac7,2", "PowerMac G5", "powermacg5"),
    def("PowerMac7,3", "PowerMac G5", "powermacg5"),
    def("PowerMac8,1", "iMac G5", ""),
    def("PowerMac8,2", "iMac G5", ""),
    def("PowerMac10,1", "Mac mini", "mini"),
    def("PowerMac10,2", "Mac mini", "mini"),
    def("PowerMac11,2", "PowerMac G5", "powermacg5"),
    def("PowerMac12,1", "iMac G5", ""),
    def("PowerBook1,1", "PowerBook 101 (Lombard)", "laptop"),
    def("PowerBook2,1", "iBook (first generation)", "laptop"),
    def("PowerBook2,2", "iBook FireWire", "laptop"),
    def("PowerBook3,1", "PowerBook Pismo", "laptop"),
    def("PowerBook3,2", "PowerBook Titanium", "laptop"),
    def("PowerBook3,3", "PowerBook Titanium w/ Gigabit Ethernet", "laptop"),
    def("PowerBook3,4", "PowerBook Titanium w/ DVI", "laptop"),
    def("PowerBook3,5", "PowerBook Titanium 1GHz", "laptop"),
    def("PowerBook4,1", "iBook 12\" (May 2001)", "laptop"),
    def("PowerBook4,2", "iBook 2", "laptop"),
    def("PowerBook4,3", "iBook 2 rev. 2 (Nov 2002)", "laptop"),
    def("PowerBook4,4", "iBook 2 rev. 2", "laptop"),
    def("PowerBook5,1", "PowerBook G4 17\"", "laptop"),
    def("PowerBook5,2", "PowerBook G4 15\"", "laptop"),
    def("PowerBook5,3", "PowerBook G4 17\" 1.33GHz", "laptop"),
    def("PowerBook5,4", "PowerBook G4 15\" 1.5/1.33GHz", "laptop"),
    def("PowerBook5,5", "PowerBook G4 17\" 1.5GHz", "laptop"),
    def("PowerBook5,6", "PowerBook G4 15\" 1.67/1.5GHz", "laptop"),
    def("PowerBook5,7", "PowerBook G4 17\" 1.67GHz", "laptop"),
    def("PowerBook5,8", "PowerBook G4 15\" double layer SD", "laptop"),
    def("PowerBook5,9", "PowerBook G4 17\" double layer SD", "laptop"),
    def("PowerBook6,1", "PowerBook G4 12\"", "laptop"),
    def("PowerBook6,2", "PowerBook G4 12\" DVI", "laptop"),
    def("PowerBook6,3", "iBook G4", "laptop"),
    def("PowerBook6,4", "PowerBook G4 12\"", "laptop"),
    def("PowerBook6,5", "iBook G4", "laptop"),
    def("PowerBook6,7", "iBook G4", "laptop"),
    def("PowerBook6,8", "PowerBook G4 12\" 1.5GHz", "laptop"),
    def("RackMac1,1", "XServe", ""),
    def("RackMac1,2", "XServe rev. 2", ""),
    def("RackMac3,1", "XServe G5", ""),
];

/// First entry whose code equals `model` exactly
pub fn lookup_model(model: &str) -> Option<&'static ModelDef> {
    if model.is_empty() {
        return None;
    }
    APPLE_MODELS.iter().find(|def| def.model == model)
}

/// Replace a board code in `node.product` with its marketing name
pub fn apply_model_name(node: &mut HardwareNode) -> bool {
    match lookup_model(&node.product) {
        Some(def) => {
            log::debug!("model {} is {}", def.model, def.name);
            node.product = def.name.to_string();
            if !def.icon.is_empty() {
                node.add_hint("icon", def.icon);
            }
            true
        }
        None => false,
    }
}
