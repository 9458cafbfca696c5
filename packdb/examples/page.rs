use packdb::{Page, Record, Result, Table};

fn main() -> Result<()> {
    let table = Table::new("customers").expect("valid table name");
    let mut page = Page::new(1024, 18)?;

    let jeff = Record::from(b"hello,my,name,jeff".as_slice());
    let john = Record::from(b"hello,my,name,john".as_slice());
    // Slot ids are positions and change when records are deleted.
    let jeff_slot = page.add_record(&jeff)?;
    let john_slot = page.add_record(&john)?;
    println!("{table}: jeff in slot {jeff_slot}, john in slot {john_slot}");

    let slot = page.delete_record(&jeff)?;
    assert_eq!(page.read_record(slot), Some(john.clone()));
    assert_eq!(page.read_record(john_slot), None);

    page.update_record(&john, b"hello,my,name,jane")?;
    for (slot, record) in page.iter().enumerate() {
        println!("{slot}: {}", String::from_utf8_lossy(record));
    }
    println!("{}", page.stats());
    table.free();
    Ok(())
}
