use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use pdf_print::*;

fn create_test_pdf(sizes: &[(i64, i64)]) -> Document {
    let boxes: Vec<[i64; 4]> = sizes.iter().map(|&(w, h)| [0, 0, w, h]).collect();
    create_test_pdf_with_boxes(&boxes)
}

fn create_test_pdf_with_boxes(media_boxes: &[[i64; 4]]) -> Document {
    let mut doc = Document::with_version("1.7");

    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for media_box in media_boxes {
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            b"0 0 m 100 100 l S".to_vec(),
        ));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(media_box.iter().map(|&v| Object::Integer(v)).collect()),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(media_boxes.len() as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

fn output_pages(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

fn media_box_size(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    let media_box = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap();
    let value = |i: usize| media_box[i].as_float().unwrap();
    (value(2) - value(0), value(3) - value(1))
}

fn print(
    source: Document,
    options: PrintOptions,
    printer: &mut VirtualPrinter,
) -> (JobSummary, Document) {
    let document = SpoolDocument::new(source).unwrap();
    let mut sequencer = PrintSequencer::new(&document, options).unwrap();
    let mut writer = SheetWriter::new();
    let summary = run_print_job(&mut sequencer, printer, &mut writer);
    (summary, writer.finish())
}

#[test]
fn test_spool_document_reads_page_sizes() {
    let document = SpoolDocument::new(create_test_pdf(&[(612, 792), (842, 595)])).unwrap();
    assert_eq!(document.page_count(), 2);
    assert_eq!(document.page_size(0), PageSize::new(612.0, 792.0));
    assert_eq!(document.page_size(1).orientation(), Orientation::Landscape);
}

#[test]
fn test_every_page_becomes_one_sheet() {
    let mut printer = VirtualPrinter::new(PaperSize::Letter);
    let (summary, output) = print(
        create_test_pdf(&[(612, 792); 3]),
        PrintOptions::default(),
        &mut printer,
    );

    assert_eq!(summary.rendered_count(), 3);
    let pages = output_pages(&output);
    assert_eq!(pages.len(), 3);
    for &page_id in &pages {
        let (width, height) = media_box_size(&output, page_id);
        assert!((width - 612.0).abs() < 0.01);
        assert!((height - 792.0).abs() < 0.01);
    }
}

#[test]
fn test_sheets_follow_page_orientation() {
    let mut printer = VirtualPrinter::new(PaperSize::Letter).with_misreported_landscape(true);
    let options = PrintOptions {
        auto_orientation: true,
        ..Default::default()
    };
    let (_, output) = print(
        create_test_pdf(&[(612, 792), (792, 612)]),
        options,
        &mut printer,
    );

    let pages = output_pages(&output);
    let (w0, h0) = media_box_size(&output, pages[0]);
    let (w1, h1) = media_box_size(&output, pages[1]);
    assert!(h0 > w0);
    assert!(w1 > h1);
}

#[test]
fn test_page_range_limits_output() {
    let mut printer = VirtualPrinter::new(PaperSize::A4);
    let options = PrintOptions {
        from_page: 2,
        to_page: 3,
        ..Default::default()
    };
    let (summary, output) = print(create_test_pdf(&[(612, 792); 5]), options, &mut printer);

    let printed: Vec<usize> = summary.pages.iter().map(|r| r.page_index).collect();
    assert_eq!(printed, vec![1, 2]);
    assert_eq!(output_pages(&output).len(), 2);
}

#[test]
fn test_out_of_range_start_writes_no_sheets() {
    let mut printer = VirtualPrinter::new(PaperSize::Letter);
    let options = PrintOptions {
        from_page: 9,
        ..Default::default()
    };
    let (summary, output) = print(create_test_pdf(&[(612, 792); 2]), options, &mut printer);

    assert_eq!(summary.pages.len(), 1);
    assert_eq!(summary.pages[0].status, PageStatus::OutOfRange);
    assert!(output_pages(&output).is_empty());
}

#[test]
fn test_sheet_draws_the_page_xobject() {
    let mut printer = VirtualPrinter::new(PaperSize::Letter)
        .with_hard_margins(HardMargins::new(25.0, 25.0));
    let (_, output) = print(
        create_test_pdf(&[(612, 792)]),
        PrintOptions::default(),
        &mut printer,
    );

    let page_id = output_pages(&output)[0];
    let content = String::from_utf8(output.get_page_content(page_id).unwrap()).unwrap();
    assert!(content.contains("cm /P0 Do"));

    let resources = output
        .get_dictionary(page_id)
        .unwrap()
        .get(b"Resources")
        .unwrap()
        .as_dict()
        .unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    let xobject_id = xobjects.get(b"P0").unwrap().as_reference().unwrap();
    let form = output.get_object(xobject_id).unwrap().as_stream().unwrap();
    assert_eq!(
        form.dict.get(b"Subtype").unwrap().as_name().unwrap(),
        b"Form"
    );
}

#[test]
fn test_page_without_area_is_skipped() {
    let mut printer = VirtualPrinter::new(PaperSize::Letter);
    let (summary, output) = print(
        create_test_pdf_with_boxes(&[[0, 0, 0, 792]]),
        PrintOptions::default(),
        &mut printer,
    );

    assert!(matches!(
        summary.pages[0].status,
        PageStatus::Degenerate(GeometryError::DegeneratePage { .. })
    ));
    assert_eq!(summary.rendered_count(), 0);
    assert!(output_pages(&output).is_empty());
}

#[test]
fn test_sheet_writer_rejects_page_without_area() {
    let source = create_test_pdf_with_boxes(&[[0, 0, 0, 792]]);
    let page_id = output_pages(&source)[0];
    let mut writer = SheetWriter::new();
    writer.start_sheet(&VirtualPrinter::default().device_settings());

    let result = writer.place_page(
        &source,
        page_id,
        [0.0, 0.0, 0.0, 792.0],
        PixelRect::new(0, 0, 5100, 6600),
        Dpi::uniform(600.0),
    );
    assert!(matches!(result, Err(PrintError::Config(_))));
}

#[test]
fn test_sheet_writer_rejects_zero_dpi() {
    let source = create_test_pdf(&[(612, 792)]);
    let page_id = output_pages(&source)[0];
    let mut writer = SheetWriter::new();
    writer.start_sheet(&VirtualPrinter::default().device_settings());

    let result = writer.place_page(
        &source,
        page_id,
        [0.0, 0.0, 612.0, 792.0],
        PixelRect::new(0, 0, 0, 0),
        Dpi::uniform(0.0),
    );
    assert!(result.is_err());
}

#[test]
fn test_inverted_media_box_is_not_mirrored() {
    let mut printer = VirtualPrinter::new(PaperSize::Letter);
    let source = create_test_pdf_with_boxes(&[[612, 792, 0, 0]]);

    let document = SpoolDocument::new(source).unwrap();
    assert_eq!(document.page_size(0), PageSize::new(612.0, 792.0));

    let mut sequencer = PrintSequencer::new(&document, PrintOptions::default()).unwrap();
    let mut writer = SheetWriter::new();
    let summary = run_print_job(&mut sequencer, &mut printer, &mut writer);
    assert_eq!(summary.rendered_count(), 1);

    let output = writer.finish();
    let page_id = output_pages(&output)[0];
    let content = String::from_utf8(output.get_page_content(page_id).unwrap()).unwrap();
    let scale_x: f64 = content.split_whitespace().nth(1).unwrap().parse().unwrap();
    let scale_y: f64 = content.split_whitespace().nth(4).unwrap().parse().unwrap();
    assert!(scale_x > 0.0);
    assert!(scale_y > 0.0);
}

#[tokio::test]
async fn test_print_round_trip_through_files() {
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let input = dir.path().join("input.pdf");
    let output_path = dir.path().join("printed.pdf");

    let mut source = create_test_pdf(&[(612, 792), (595, 842)]);
    let mut bytes = Vec::new();
    source.save_to(&mut bytes).unwrap();
    std::fs::write(&input, bytes).unwrap();

    let loaded = load_pdf(&input).await.unwrap();
    let mut printer = VirtualPrinter::new(PaperSize::Letter);
    let (summary, output) = print(loaded, PrintOptions::default(), &mut printer);
    assert_eq!(summary.rendered_count(), 2);

    save_pdf(output, &output_path).await.unwrap();
    let reloaded = load_pdf(&output_path).await.unwrap();
    assert_eq!(reloaded.get_pages().len(), 2);
}

#[tokio::test]
async fn test_load_missing_file_fails() {
    let result = load_pdf("/nonexistent/input.pdf").await;
    assert!(matches!(result, Err(PrintError::Io(_))));
}
