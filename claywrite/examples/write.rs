use claywrite::{
    pdf::{
        Dictionary, Document, IndirectObject, Name, Object, ObjectId, ObjectStream, PdfString, Reference, Revision,
        XrefStream,
    },
    writer::WriterConfig,
};
use std::path::PathBuf;
use structopt::StructOpt;

/// Write a small PDF with an incremental update.
#[derive(StructOpt, Debug)]
#[structopt(name = "claywrite-write")]
struct Opt {
    /// Output file
    #[structopt(short, long, parse(from_os_str))]
    output: PathBuf,

    /// Compress object streams and xref streams
    #[structopt(short, long)]
    compress: bool,

    /// Store the update in an object stream with a xref stream
    #[structopt(long)]
    packed: bool,
}

fn dict(entries: Vec<(&str, Object)>) -> Object {
    entries
        .into_iter()
        .map(|(key, value)| (Name::from(key), value))
        .collect::<Dictionary>()
        .into()
}

fn reference(number: u32) -> Object {
    Reference { number, generation: 0 }.into()
}

/// Catalog, page tree and one empty page.
fn first_revision() -> Revision {
    let mut revision = Revision::new();
    revision.extend([
        IndirectObject::new(
            ObjectId::new(1, 0),
            dict(vec![("Type", Name::from("Catalog").into()), ("Pages", reference(2))]),
        ),
        IndirectObject::new(
            ObjectId::new(2, 0),
            dict(vec![
                ("Type", Name::from("Pages").into()),
                ("Kids", vec![reference(3)].into()),
                ("Count", Object::Integer(1)),
            ]),
        ),
        IndirectObject::new(
            ObjectId::new(3, 0),
            dict(vec![
                ("Type", Name::from("Page").into()),
                ("Parent", reference(2)),
                (
                    "MediaBox",
                    [0, 0, 595, 842].into_iter().map(Object::Integer).collect::<Vec<_>>().into(),
                ),
            ]),
        ),
    ]);
    revision.set_root(Reference { number: 1, generation: 0 });
    revision
}

/// Adds a document information dictionary.
fn update(packed: bool) -> Revision {
    let mut revision = Revision::new();
    revision.push(IndirectObject::new(
        ObjectId::new(4, 0),
        dict(vec![
            ("Title", PdfString::from("claywrite demo").into()),
            ("Producer", PdfString::from("claywrite").into()),
        ]),
    ));
    if packed {
        revision.extend([
            IndirectObject::object_stream(ObjectId::new(5, 0), ObjectStream::new(vec![4])),
            IndirectObject::xref_stream(ObjectId::new(6, 0), XrefStream::new()),
        ]);
    }
    revision.set_root(Reference { number: 1, generation: 0 });
    revision.set_info(Reference { number: 4, generation: 0 });
    revision
}

pub fn main() {
    env_logger::init();
    let opt = Opt::from_args();

    let mut document = Document::new((1, 7));
    document.push_revision(first_revision());
    document.push_revision(update(opt.packed));

    log::debug!("Write PDF to {:?}", opt.output);
    let config = WriterConfig::new().with_compression(opt.compress);
    if let Err(e) = claywrite::write_file(&document, opt.output.as_path(), config) {
        log::error!("Error while writing: {}", e);
        std::process::exit(1);
    }
}
