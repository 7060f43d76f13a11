// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::JobError;

/// Chain A of every job: the effector protein the guides are loaded into.
pub const PROTEIN_SEQUENCE: &str = "IEKKKSFAKGMGVKSTLVSGSKVYMTTFAEGSDARLEKIVEGDSIRSVNEGEAFSAEMADKNAGYKIGNAKFSHPKGYAVVANNPLYTGPVQQDMLGLKETLEKRYFGESADGNDNICIQVIHNILDIEKILAEYITNAAYAVNNISGLDKDIIGFGKFSTVYTYDEFKDPEHHRAAFNNNDKLINAIKAQYDEFDNFLDNPRLGYFGQAFFSKEGRNYIINYGNECYDILALLSGLAHWVVANNEEESRISRTWLYNLDKNLDNEYISTLNYLYDRITNELTNSFSKNSAANVNYIAETLGINPAEFAEQYFRFSIMKEQKNLGFNITKLREVMLDRKDMSEIRKNHKVFDSIRTKVYTMMDFVIYRYYIEEDAKVAAANKSLPDNEKSLSEKDIFVINLRGSFNDDQKDALYYDEANRIWRKLENIMHNIKEFRGNKTREYKKKDAPRLPRILPAGRDVSAFSKLMYALTMFLDGKEINDLLTTLINKFDNIQSFLKVMPLIGVNAKFVEEYAFFKDSAKIADELRLIKSFARMGEPIADARRAMYIDAIRILGTNLSYDELKALADTFSLDENGNKLKKGKHGMRNFIINNVISNKRFHYLIRYGDPAHLHEIAKNEAVVKFVLGRIADIQKKQGQNGKNQIDRYYETCIGKDKGKSVSEKVDALTKIITGMNYDQFDKKRSVIEDTGRENAEREKFKKIISLYLTVIYHILKNIVNINARYVIGFHCVERDAQLYKEKGYDINLKKLEEKGFSSVTKLCAGIDETAPDKRKDVEKEMAERAKESIDSLESANPKLYANYIKYSDEKKAEEFTRQINREKAKTALNAYLRNTKWNVIIREDLLRIDNKTCTLFANKAVALEVARYVHAYINDIAEVNSYFQLYHYIMQRIIMNERYEKSSGKVSEYFDAVNDEKKYNDRLLKLLCVPFGYCIPRFKNLSIEALFDRNEAAKFDKEKKKVSGNS";

pub const DIALECT: &str = "alphafold3";
pub const VERSION: u32 = 1;
pub const MODEL_SEEDS: [u32; 1] = [1];

pub const PROTEIN_CHAIN: &str = "A";
pub const TARGET_CHAIN: &str = "B";
pub const GUIDE_CHAIN: &str = "C";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    pub id: Vec<String>,
    pub sequence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceEntry {
    Protein(Chain),
    Rna(Chain),
}

/// An AlphaFold3 job: the protein, then the target RNA, then the guide RNA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescriptor {
    name: String,
    sequences: Vec<SequenceEntry>,
    model_seeds: Vec<u32>,
    dialect: String,
    version: u32,
}

impl Chain {
    fn new(id: &str, sequence: &str) -> Self {
        Chain {
            id: vec![String::from(id)],
            sequence: String::from(sequence),
        }
    }
}

impl JobDescriptor {
    /// Sequences are taken as-is; their alphabet is not checked.
    pub fn new(name: &str, target: &str, guide: &str) -> Self {
        JobDescriptor {
            name: String::from(name),
            sequences: vec![
                SequenceEntry::Protein(Chain::new(PROTEIN_CHAIN, PROTEIN_SEQUENCE)),
                SequenceEntry::Rna(Chain::new(TARGET_CHAIN, target)),
                SequenceEntry::Rna(Chain::new(GUIDE_CHAIN, guide)),
            ],
            model_seeds: MODEL_SEEDS.to_vec(),
            dialect: String::from(DIALECT),
            version: VERSION,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sequences(&self) -> &[SequenceEntry] {
        &self.sequences
    }

    pub fn model_seeds(&self) -> &[u32] {
        &self.model_seeds
    }

    pub fn dialect(&self) -> &str {
        &self.dialect
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.name)
    }
}

/// Writes descriptors into one output directory, which is created on construction.
#[derive(Debug)]
pub struct JobWriter {
    dir: PathBuf,
}

impl JobWriter {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, JobError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(JobWriter { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Pretty-prints `job` to `<dir>/<name>.json`, replacing any file of that name.
    pub fn write(&self, job: &JobDescriptor) -> Result<PathBuf, JobError> {
        let path = self.dir.join(job.file_name());
        let mut out = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut out, job)?;
        out.flush()?;
        Ok(path)
    }
}
