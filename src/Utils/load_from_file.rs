use crate::Mechanism::chemkin_parser::{ChemkinFile, ChemkinParser};
use crate::Pathways::graph_deserializer::graph_from_json_str;
use crate::Pathways::pathway_search::PathSearchGraph;
use crate::Pathways::reaction_graph::ReactionGraph;
use crate::errors::{MechGraphError, MechGraphResult};
use crate::settings::MechGraphSettings;
use log::{error, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Source of a mechanism or of a serialized graph on disk.
/// Files ending in `.json` are read as node/edge graphs, everything else as Chemkin text.
pub struct LoadData {
    pub file_name: String,
}

impl LoadData {
    pub fn new(file_name: String) -> Self {
        LoadData { file_name }
    }

    pub fn is_serialized_graph(&self) -> bool {
        Path::new(&self.file_name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }

    pub fn load_mechanism(&self, settings: &MechGraphSettings) -> MechGraphResult<ChemkinFile> {
        let text = read_text(&self.file_name)?;
        let mechanism = ChemkinParser::with_settings(settings)
            .parse(&text)
            .inspect_err(|e| error!("failed to parse mechanism '{}': {}", self.file_name, e))?;
        info!(
            "mechanism '{}' loaded: {} species, {} reactions",
            self.file_name,
            mechanism.species.len(),
            mechanism.reactions.len()
        );
        Ok(mechanism)
    }

    pub fn load_graph(&self, settings: &MechGraphSettings) -> MechGraphResult<ReactionGraph> {
        if self.is_serialized_graph() {
            let text = read_text(&self.file_name)?;
            graph_from_json_str(&text)
                .inspect_err(|e| error!("failed to read graph '{}': {}", self.file_name, e))
        } else {
            Ok(ReactionGraph::from_chemkin(&self.load_mechanism(settings)?))
        }
    }
    /// graph plus adjacency index, ready for queries
    pub fn load_search_graph(
        &self,
        settings: &MechGraphSettings,
    ) -> MechGraphResult<PathSearchGraph> {
        Ok(PathSearchGraph::new(self.load_graph(settings)?))
    }
}

/// Reads the whole file, line endings normalized to `\n`.
pub fn read_text(file_name: &str) -> MechGraphResult<String> {
    let path = Path::new(file_name);
    if !path.exists() {
        error!("file '{}' does not exist", file_name);
        return Err(MechGraphError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("file '{}' does not exist", file_name),
        )));
    }
    let reader = BufReader::new(File::open(path)?);
    let lines: Vec<String> = reader.lines().collect::<Result<_, _>>()?;
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::RateErrorPolicy;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    const MECHANISM: &str = "ELEMENTS\nH O\nEND\nSPECIES\nH2 O2 H2O\nEND\nREACTIONS\n\
                             H2+O2=>H2O 1.0 0.0 0.0\nEND\n";

    #[test]
    fn test_load_mechanism() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", MECHANISM).unwrap();
        let file_path = temp_file.path().to_str().unwrap().to_string();

        let loader = LoadData::new(file_path);
        assert!(!loader.is_serialized_graph());
        let mechanism = loader.load_mechanism(&MechGraphSettings::new()).unwrap();
        assert_eq!(mechanism.species, vec!["H2", "H2O", "O2"]);
        assert_eq!(mechanism.reactions.len(), 1);

        let search = loader.load_search_graph(&MechGraphSettings::new()).unwrap();
        let result = search.shortest_path(["H2", "O2"], "H2O");
        assert_relative_eq!(result.cost, 1.0);
    }

    #[test]
    fn test_load_serialized_graph() {
        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            temp_file,
            r#"{{"nodes": [{{"key": "A", "attributes": {{"type": "species"}}}},
                          {{"key": "A => B", "attributes": {{"type": "reaction", "weight": 2.5}}}},
                          {{"key": "B", "attributes": {{"type": "species"}}}}],
               "edges": [{{"source": "A", "target": "A => B"}},
                         {{"source": "A => B", "target": "B"}}]}}"#
        )
        .unwrap();
        let loader = LoadData::new(temp_file.path().to_str().unwrap().to_string());
        assert!(loader.is_serialized_graph());
        let search = loader.load_search_graph(&MechGraphSettings::new()).unwrap();
        assert_eq!(search.graph().node_count(), 3);
        let result = search.shortest_path("A", "B");
        assert_relative_eq!(result.cost, 2.5);
    }

    #[test]
    fn test_missing_file() {
        let loader = LoadData::new("no_such_mechanism_file.inp".to_string());
        assert!(matches!(
            loader.load_mechanism(&MechGraphSettings::new()),
            Err(MechGraphError::Io(_))
        ));
    }

    #[test]
    fn test_settings_reach_parser() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            "ELEMENTS\nH O\nEND\nSPECIES\nH2 O2 H2O\nEND\nREACTIONS\n\
             H2+O2=>H2O 1.0 bad 0.0\nH2O=>H2+O2 1.0 0.0 0.0\nEND\n"
        )
        .unwrap();
        let loader = LoadData::new(temp_file.path().to_str().unwrap().to_string());
        assert!(matches!(
            loader.load_mechanism(&MechGraphSettings::new()),
            Err(MechGraphError::UnparsableRateConstant { .. })
        ));
        let mut settings = MechGraphSettings::new();
        settings.rate_error_policy = RateErrorPolicy::Skip;
        let mechanism = loader.load_mechanism(&settings).unwrap();
        assert_eq!(mechanism.reactions.len(), 1);
        assert_eq!(mechanism.reactions[0].equation, "H2O => H2 + O2");
    }
}
