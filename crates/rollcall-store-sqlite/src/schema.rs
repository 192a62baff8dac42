//! SQL schema for a voter-roll snapshot.
//!
//! Column names follow the upstream extract headers so that snapshots built
//! by earlier tooling can be opened and compared as-is. Executed once when a
//! store is opened for writing; read-only handles never run DDL.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS voters (
    VoterId           INTEGER PRIMARY KEY,
    CountyCode        TEXT,
    FirstName         TEXT,
    MiddleName        TEXT,
    LastName          TEXT,
    NameSuffix        TEXT,
    HouseNumber       TEXT,
    StreetName        TEXT,
    UnitType          TEXT,
    UnitNumber        TEXT,
    Address2          TEXT,
    City              TEXT,
    State             TEXT,
    ZipCode           TEXT,
    MailAddress       TEXT,
    MailCity          TEXT,
    MailState         TEXT,
    MailZipCode       TEXT,
    PhoneNumber       TEXT,
    RegistrationDate  TEXT,             -- YYYY-MM-DD
    DOBYear           INTEGER,
    StateMcdCode      TEXT,
    McdName           TEXT,
    PrecinctCode      TEXT,
    PrecinctName      TEXT,
    WardCode          TEXT,
    School            TEXT,
    SchSub            TEXT,
    Judicial          TEXT,
    Legislative       TEXT,
    StateSen          TEXT,
    Congressional     TEXT,
    Commissioner      TEXT,
    Park              TEXT,
    SoilWater         TEXT,
    Hospital          TEXT,
    LegacyId          TEXT,
    PermanentAbsentee TEXT
);

-- Zero or more rows per voter. The foreign key is declared, not enforced.
CREATE TABLE IF NOT EXISTS election_history (
    VoterId             INTEGER,
    ElectionDate        TEXT,           -- YYYY-MM-DD
    ElectionDescription TEXT,
    VotingMethod        TEXT,
    FOREIGN KEY (VoterId) REFERENCES voters(VoterId)
);

-- Lookup path.
CREATE INDEX IF NOT EXISTS idx_fn     ON voters(FirstName);
CREATE INDEX IF NOT EXISTS idx_ln     ON voters(LastName);
CREATE INDEX IF NOT EXISTS idx_zip    ON voters(ZipCode);
-- Differ path.
CREATE INDEX IF NOT EXISTS idx_county ON voters(CountyCode);
CREATE INDEX IF NOT EXISTS idx_history_voter ON election_history(VoterId);
-- Full-tuple identity, so re-importing a history file is a no-op.
CREATE UNIQUE INDEX IF NOT EXISTS idx_history_tuple
    ON election_history(VoterId, ElectionDate, ElectionDescription, VotingMethod);

PRAGMA user_version = 1;
";
