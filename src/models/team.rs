//! Team, GroupMatch, and the team catalog (48 teams in 12 groups of 4).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io;

/// Group label, `'A'` to `'L'`.
pub type GroupLetter = char;

/// Short team code (flag/lookup key). Unique within a catalog.
pub type TeamCode = String;

/// Group match id, e.g. `"A-M1-1"`.
pub type GroupMatchId = String;

/// All group labels in draw order.
pub const GROUPS: [GroupLetter; 12] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L'];

/// Teams per group.
pub const TEAMS_PER_GROUP: usize = 4;

/// Official draw: (name, code, group). Play-off placeholders carry numbered codes.
const OFFICIAL_DRAW: [(&str, &str, GroupLetter); 48] = [
    ("México", "mx", 'A'),
    ("Sudáfrica", "za", 'A'),
    ("Corea del Sur", "kr", 'A'),
    ("UEFA 4", "eu-4", 'A'),
    ("Canadá", "ca", 'B'),
    ("UEFA 1", "eu-1", 'B'),
    ("Qatar", "qa", 'B'),
    ("Suiza", "ch", 'B'),
    ("Brasil", "br", 'C'),
    ("Marruecos", "ma", 'C'),
    ("Haití", "ht", 'C'),
    ("Escocia", "gb-sct", 'C'),
    ("Estados Unidos", "us", 'D'),
    ("Paraguay", "py", 'D'),
    ("Australia", "au", 'D'),
    ("UEFA 3", "eu-3", 'D'),
    ("Alemania", "de", 'E'),
    ("Curazao", "cw", 'E'),
    ("Costa de Marfil", "ci", 'E'),
    ("Ecuador", "ec", 'E'),
    ("Países Bajos", "nl", 'F'),
    ("Japón", "jp", 'F'),
    ("UEFA 2", "eu-2", 'F'),
    ("Túnez", "tn", 'F'),
    ("Bélgica", "be", 'G'),
    ("Egipto", "eg", 'G'),
    ("Irán", "ir", 'G'),
    ("Nueva Zelanda", "nz", 'G'),
    ("España", "es", 'H'),
    ("Cabo Verde", "cv", 'H'),
    ("Arabia Saudita", "sa", 'H'),
    ("Uruguay", "uy", 'H'),
    ("Francia", "fr", 'I'),
    ("Senegal", "sn", 'I'),
    ("FIFA 2", "un-2", 'I'),
    ("Noruega", "no", 'I'),
    ("Argentina", "ar", 'J'),
    ("Argelia", "dz", 'J'),
    ("Austria", "at", 'J'),
    ("Jordania", "jo", 'J'),
    ("Portugal", "pt", 'K'),
    ("FIFA 1", "un-1", 'K'),
    ("Uzbekistán", "uz", 'K'),
    ("Colombia", "co", 'K'),
    ("Inglaterra", "gb-eng", 'L'),
    ("Croacia", "hr", 'L'),
    ("Ghana", "gh", 'L'),
    ("Panamá", "pa", 'L'),
];

/// Errors raised while building a team catalog.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CatalogError {
    /// A team belongs to a group outside `A`..`L`.
    UnknownGroup(GroupLetter),
    /// A group does not hold exactly four teams.
    WrongGroupSize { group: GroupLetter, size: usize },
    /// Two teams share a code.
    DuplicateCode(TeamCode),
    /// A team has an empty name or code.
    EmptyField,
    /// The CSV source could not be read or parsed.
    Csv(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::UnknownGroup(g) => write!(f, "Unknown group '{}'", g),
            CatalogError::WrongGroupSize { group, size } => {
                write!(f, "Group {} must have 4 teams (has {})", group, size)
            }
            CatalogError::DuplicateCode(code) => write!(f, "Duplicate team code '{}'", code),
            CatalogError::EmptyField => write!(f, "Team name and code must not be empty"),
            CatalogError::Csv(msg) => write!(f, "Could not read team catalog: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

/// A national team. Never mutated once the catalog is built.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub code: TeamCode,
    pub group: GroupLetter,
}

impl Team {
    pub fn new(name: impl Into<String>, code: impl Into<String>, group: GroupLetter) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            group,
        }
    }
}

/// A group-stage fixture between two team slots.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupMatch {
    pub id: GroupMatchId,
    pub home_team: TeamCode,
    pub away_team: TeamCode,
    pub group: GroupLetter,
    /// 1 to 3.
    pub matchday: u8,
}

/// The 48 teams, in draw order within each group.
#[derive(Clone, Debug, Serialize)]
pub struct TeamCatalog {
    teams: Vec<Team>,
}

impl TeamCatalog {
    /// Build a catalog, checking 12 groups of 4 with unique codes.
    pub fn new(teams: Vec<Team>) -> Result<Self, CatalogError> {
        let mut codes = HashSet::new();
        for t in &teams {
            if t.name.trim().is_empty() || t.code.trim().is_empty() {
                return Err(CatalogError::EmptyField);
            }
            if !GROUPS.contains(&t.group) {
                return Err(CatalogError::UnknownGroup(t.group));
            }
            if !codes.insert(t.code.as_str()) {
                return Err(CatalogError::DuplicateCode(t.code.clone()));
            }
        }
        for group in GROUPS {
            let size = teams.iter().filter(|t| t.group == group).count();
            if size != TEAMS_PER_GROUP {
                return Err(CatalogError::WrongGroupSize { group, size });
            }
        }
        Ok(Self { teams })
    }

    /// The official draw.
    pub fn official() -> Self {
        let teams = OFFICIAL_DRAW
            .iter()
            .map(|&(name, code, group)| Team::new(name, code, group))
            .collect();
        Self { teams }
    }

    /// Load a catalog from CSV with header `name,code,group`.
    pub fn from_csv<R: io::Read>(reader: R) -> Result<Self, CatalogError> {
        #[derive(Deserialize)]
        struct Row {
            name: String,
            code: String,
            group: String,
        }

        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut teams = Vec::new();
        for row in rdr.deserialize::<Row>() {
            let row = row.map_err(|e| CatalogError::Csv(e.to_string()))?;
            let mut chars = row.group.chars();
            let group = match (chars.next(), chars.next()) {
                (Some(c), None) => c.to_ascii_uppercase(),
                _ => return Err(CatalogError::Csv(format!("bad group '{}'", row.group))),
            };
            teams.push(Team::new(row.name, row.code, group));
        }
        Self::new(teams)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Teams of one group, in draw order (empty for an unknown group).
    pub fn teams_in_group(&self, group: GroupLetter) -> Vec<Team> {
        self.teams.iter().filter(|t| t.group == group).cloned().collect()
    }

    pub fn team_by_code(&self, code: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.code == code)
    }
}

impl Default for TeamCatalog {
    fn default() -> Self {
        Self::official()
    }
}
