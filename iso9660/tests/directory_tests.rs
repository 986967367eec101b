//! Directory navigation and file finding tests

mod common;

use common::IsoBuilder;
use iso9660::error::Iso9660Error;
use iso9660::{find_file, mount, SECTOR_SIZE};

fn sample() -> common::MemoryBlockDevice {
    let mut builder = IsoBuilder::new();
    builder.add_file("README.TXT;1", b"read me\n");
    builder.add_dir("BOOT");
    builder.add_dir("BOOT/GRUB");
    builder.add_file("BOOT/GRUB/GRUB.CFG;1", b"timeout=0\n");
    builder.build()
}

#[test]
fn test_root_paths() {
    let mut device = sample();
    let mut scratch = [0u8; SECTOR_SIZE];
    let volume = mount(&mut device, 0, &mut scratch).expect("mount should succeed");

    for path in ["", "/", "//", "/./"] {
        let entry = find_file(&mut device, &volume, path, &mut scratch)
            .unwrap_or_else(|_| panic!("Path '{}' should resolve to root", path));

        assert_eq!(entry.extent_lba, volume.root_extent_lba);
        assert!(entry.is_directory());
    }
}

#[test]
fn test_find_nonexistent_file() {
    let mut device = sample();
    let mut scratch = [0u8; SECTOR_SIZE];
    let volume = mount(&mut device, 0, &mut scratch).expect("mount");

    let result = find_file(&mut device, &volume, "/nonexistent.txt", &mut scratch);
    assert_eq!(result.unwrap_err(), Iso9660Error::NotFound);
}

#[test]
fn test_case_insensitive_and_version_stripped() {
    let mut device = sample();
    let mut scratch = [0u8; SECTOR_SIZE];
    let volume = mount(&mut device, 0, &mut scratch).expect("mount");

    for path in ["/readme.txt", "/README.TXT", "/Readme.Txt;1"] {
        let entry = find_file(&mut device, &volume, path, &mut scratch).expect("found");
        assert_eq!(entry.name, "README.TXT");
        assert_eq!(entry.size, 8);
        assert!(entry.is_file());
    }
}

#[test]
fn test_nested_lookup() {
    let mut device = sample();
    let mut scratch = [0u8; SECTOR_SIZE];
    let volume = mount(&mut device, 0, &mut scratch).expect("mount");

    let grub = find_file(&mut device, &volume, "/boot/grub", &mut scratch).expect("dir");
    assert!(grub.is_directory());

    let cfg = find_file(&mut device, &volume, "/boot/grub/grub.cfg", &mut scratch).expect("file");
    assert_eq!(cfg.size, 10);
}

#[test]
fn test_file_in_middle_of_path_is_not_a_directory() {
    let mut device = sample();
    let mut scratch = [0u8; SECTOR_SIZE];
    let volume = mount(&mut device, 0, &mut scratch).expect("mount");

    let result = find_file(&mut device, &volume, "/readme.txt/inner", &mut scratch);
    assert_eq!(result.unwrap_err(), Iso9660Error::NotADirectory);
}

#[test]
fn test_path_depth_limit() {
    let mut device = sample();
    let mut scratch = [0u8; SECTOR_SIZE];
    let volume = mount(&mut device, 0, &mut scratch).expect("mount");

    let deep_path = "/level".repeat(10);
    let result = find_file(&mut device, &volume, &deep_path, &mut scratch);
    assert_eq!(result.unwrap_err(), Iso9660Error::PathTooLong);
}

#[test]
fn test_lookup_scans_every_directory_sector() {
    let mut builder = IsoBuilder::new();
    for i in 0..60 {
        builder.add_file(&format!("FILE{:04}.DAT;1", i), &[i as u8]);
    }
    let mut device = builder.build();
    let mut scratch = [0u8; SECTOR_SIZE];
    let volume = mount(&mut device, 0, &mut scratch).expect("mount");
    assert!(volume.root_extent_len as usize > SECTOR_SIZE);

    let last = find_file(&mut device, &volume, "/file0059.dat", &mut scratch).expect("last");
    assert_eq!(last.size, 1);
}

#[test]
fn test_read_fault_surfaces_as_io_error() {
    let mut builder = IsoBuilder::new();
    builder.add_file("A.TXT;1", b"a");
    let mut device = builder.build().failing_from(18);
    let mut scratch = [0u8; SECTOR_SIZE];
    let volume = mount(&mut device, 0, &mut scratch).expect("descriptors are below 18");

    let result = find_file(&mut device, &volume, "/a.txt", &mut scratch);
    assert_eq!(result.unwrap_err(), Iso9660Error::IoError);
}
