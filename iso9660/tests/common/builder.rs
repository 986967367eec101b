use crate::common::MemoryBlockDevice;

const SECTOR: usize = 2048;

struct DirSpec {
    name: String,
    parent: usize,
    subdirs: Vec<usize>,
    files: Vec<(String, Vec<u8>)>,
}

/// Synthesizes ISO9660 images: PVD at 16, terminator at 17, directory
/// extents from 18, file data after the directories.
pub struct IsoBuilder {
    dirs: Vec<DirSpec>,
    volume_id: String,
}

impl IsoBuilder {
    pub fn new() -> Self {
        Self {
            dirs: vec![DirSpec {
                name: String::new(),
                parent: 0,
                subdirs: Vec::new(),
                files: Vec::new(),
            }],
            volume_id: String::from("KONSTRUCT"),
        }
    }

    #[allow(dead_code)]
    pub fn volume_id(mut self, id: &str) -> Self {
        self.volume_id = id.to_string();
        self
    }

    /// Add a directory; `path` is `/`-separated on-disk names, parents must exist
    #[allow(dead_code)]
    pub fn add_dir(&mut self, path: &str) {
        let (parent, name) = self.split(path);
        let idx = self.dirs.len();
        self.dirs.push(DirSpec {
            name: name.to_string(),
            parent,
            subdirs: Vec::new(),
            files: Vec::new(),
        });
        self.dirs[parent].subdirs.push(idx);
    }

    /// Add a file; the on-disk name is used verbatim (include `;1` yourself)
    pub fn add_file(&mut self, path: &str, content: &[u8]) {
        let (parent, name) = self.split(path);
        self.dirs[parent]
            .files
            .push((name.to_string(), content.to_vec()));
    }

    fn split<'a>(&self, path: &'a str) -> (usize, &'a str) {
        let mut parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        let name = parts.pop().expect("non-empty path");
        let mut dir = 0;
        for part in parts {
            dir = *self.dirs[dir]
                .subdirs
                .iter()
                .find(|&&d| self.dirs[d].name == part)
                .expect("parent directory added first");
        }
        (dir, name)
    }

    fn record_len(name_len: usize) -> usize {
        let len = 33 + name_len;
        len + (len % 2)
    }

    /// Record names of a directory in on-disk order, with their flags
    fn records(&self, idx: usize) -> Vec<(Vec<u8>, u8, Option<usize>)> {
        let dir = &self.dirs[idx];
        let mut out = vec![
            (vec![0u8], 0x02, Some(idx)),
            (vec![1u8], 0x02, Some(dir.parent)),
        ];
        for &sub in &dir.subdirs {
            out.push((self.dirs[sub].name.as_bytes().to_vec(), 0x02, Some(sub)));
        }
        for (name, _) in &dir.files {
            out.push((name.as_bytes().to_vec(), 0x00, None));
        }
        out
    }

    fn dir_sectors(&self, idx: usize) -> usize {
        let mut sectors = 1;
        let mut used = 0;
        for (name, _, _) in self.records(idx) {
            let len = Self::record_len(name.len());
            if used + len > SECTOR {
                sectors += 1;
                used = 0;
            }
            used += len;
        }
        sectors
    }

    pub fn build(self) -> MemoryBlockDevice {
        // Directory extents
        let mut next_lba = 18usize;
        let mut dir_lba = Vec::new();
        let mut dir_len = Vec::new();
        for idx in 0..self.dirs.len() {
            let sectors = self.dir_sectors(idx);
            dir_lba.push(next_lba);
            dir_len.push(sectors * SECTOR);
            next_lba += sectors;
        }

        // File extents
        let mut file_lba = Vec::new();
        for dir in &self.dirs {
            let mut lbas = Vec::new();
            for (_, content) in &dir.files {
                lbas.push(next_lba);
                next_lba += content.len().div_ceil(SECTOR);
            }
            file_lba.push(lbas);
        }

        let total = next_lba + 1;
        let mut data = vec![0u8; total * SECTOR];

        // 1. PVD at 16
        let pvd = 16 * SECTOR;
        data[pvd] = 1;
        data[pvd + 1..pvd + 6].copy_from_slice(b"CD001");
        data[pvd + 6] = 1;
        let id = format!("{:<32}", self.volume_id);
        data[pvd + 40..pvd + 72].copy_from_slice(&id.as_bytes()[..32]);
        Self::both_u32(&mut data[pvd + 80..], total as u32);
        Self::both_u16(&mut data[pvd + 128..], SECTOR as u16);
        let mut root_at = pvd + 156;
        Self::write_record(&mut data, &mut root_at, dir_lba[0] as u32, dir_len[0] as u32, 0x02, &[0]);

        // 2. Terminator at 17
        let term = 17 * SECTOR;
        data[term] = 255;
        data[term + 1..term + 6].copy_from_slice(b"CD001");
        data[term + 6] = 1;

        // 3. Directory extents
        for idx in 0..self.dirs.len() {
            let base = dir_lba[idx] * SECTOR;
            let mut offset = base;
            let mut file_no = 0;
            for (name, flags, target) in self.records(idx) {
                let len = Self::record_len(name.len());
                if (offset - base) % SECTOR + len > SECTOR {
                    offset = base + ((offset - base) / SECTOR + 1) * SECTOR;
                }
                let (lba, size) = match target {
                    Some(d) => (dir_lba[d] as u32, dir_len[d] as u32),
                    None => {
                        let n = file_no;
                        file_no += 1;
                        let content = &self.dirs[idx].files[n].1;
                        (file_lba[idx][n] as u32, content.len() as u32)
                    }
                };
                Self::write_record(&mut data, &mut offset, lba, size, flags, &name);
            }
        }

        // 4. File data
        for (idx, dir) in self.dirs.iter().enumerate() {
            for (n, (_, content)) in dir.files.iter().enumerate() {
                let at = file_lba[idx][n] * SECTOR;
                data[at..at + content.len()].copy_from_slice(content);
            }
        }

        MemoryBlockDevice::new(data)
    }

    fn both_u32(dst: &mut [u8], value: u32) {
        dst[0..4].copy_from_slice(&value.to_le_bytes());
        dst[4..8].copy_from_slice(&value.to_be_bytes());
    }

    fn both_u16(dst: &mut [u8], value: u16) {
        dst[0..2].copy_from_slice(&value.to_le_bytes());
        dst[2..4].copy_from_slice(&value.to_be_bytes());
    }

    fn write_record(data: &mut [u8], offset: &mut usize, lba: u32, size: u32, flags: u8, name: &[u8]) {
        let len = Self::record_len(name.len());
        let start = *offset;
        data[start] = len as u8;
        data[start + 1] = 0; // Ext attr len
        Self::both_u32(&mut data[start + 2..], lba);
        Self::both_u32(&mut data[start + 10..], size);
        // Date (7 bytes) - all zero is fine for test
        data[start + 25] = flags;
        Self::both_u16(&mut data[start + 28..], 1);
        data[start + 32] = name.len() as u8;
        data[start + 33..start + 33 + name.len()].copy_from_slice(name);
        *offset += len;
    }
}
