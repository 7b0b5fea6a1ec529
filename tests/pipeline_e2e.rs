mod common;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use common::{FakeSite, pdf_bytes};
use pretty_assertions::assert_eq;
use rol_procedimentos::{Config, PipelineError, run};
use tempfile::tempdir;

const PAGE_URL: &str = "https://ans.example/rol";
const PDF_URL: &str = "https://ans.example/docs/Anexo_I_rol.pdf";

fn config_in(base: &Path) -> Config {
    Config {
        page_url: PAGE_URL.to_string(),
        ..Config::default()
    }
    .rooted_at(base)
}

fn page_linking(href: &str) -> String {
    format!(
        r#"<html><body>
            <a href="/docs/rol_completo.pdf">Rol completo</a>
            <a href="{href}">Anexo I</a>
        </body></html>"#
    )
}

fn archive_entry(path: &Path) -> (String, String) {
    let mut archive =
        zip::ZipArchive::new(File::open(path).expect("archive exists")).expect("valid zip");
    assert_eq!(archive.len(), 1);
    let mut entry = archive.by_index(0).expect("entry 0");
    let mut content = String::new();
    entry.read_to_string(&mut content).expect("utf-8 entry");
    (entry.name().to_string(), content)
}

#[test]
fn publishes_normalized_csv_inside_archive() {
    let dir = tempdir().expect("tempdir should be created");
    let config = config_in(dir.path());
    let site = FakeSite::default()
        .with_page(PAGE_URL, &page_linking("/docs/Anexo_I_rol.pdf"))
        .with_file(PDF_URL, pdf_bytes(&[vec!["OD  AMB", "OD  Nao"]]));

    let archive = run(&config, &site).expect("pipeline succeeds");

    assert_eq!(archive, config.archive_path());
    let (name, content) = archive_entry(&archive);
    assert_eq!(name, "lista_de_procedimentos.csv");
    assert_eq!(content, "\u{feff},OD,AMB\n0,Seg. Odontológica,Nao\n");

    assert!(!config.download_dir.exists(), "downloads are removed");
    assert!(!config.csv_path().exists(), "intermediate CSV is removed");
    assert_eq!(
        *site.requests.borrow(),
        vec![PAGE_URL.to_string(), PDF_URL.to_string()]
    );
}

#[test]
fn legend_applies_under_page_heading_and_footer() {
    let dir = tempdir().expect("tempdir should be created");
    let config = config_in(dir.path());
    let site = FakeSite::default()
        .with_page(PAGE_URL, &page_linking("/docs/Anexo_I_rol.pdf"))
        .with_file(
            PDF_URL,
            pdf_bytes(&[vec![
                "ANEXO I LISTA DE PROCEDIMENTOS",
                "PROCEDIMENTO  OD  AMB",
                "CONSULTA  OD  Nao",
                "Pagina 1 de 1",
            ]]),
        );

    let archive = run(&config, &site).expect("pipeline succeeds");

    let (_, content) = archive_entry(&archive);
    assert_eq!(
        content,
        "\u{feff},PROCEDIMENTO,OD,AMB\n0,CONSULTA,Seg. Odontológica,Nao\n"
    );
}

#[test]
fn page_without_annex_link_fails_and_still_cleans_up() {
    let dir = tempdir().expect("tempdir should be created");
    let config = config_in(dir.path());
    let site = FakeSite::default().with_page(PAGE_URL, &page_linking("/docs/Anexo_II.xlsx"));

    let error = run(&config, &site).expect_err("no annex link");

    assert!(matches!(error, PipelineError::NoLinkFound), "{error:?}");
    assert!(!config.download_dir.exists());
    assert!(!config.archive_path().exists());
}

#[test]
fn unreachable_page_is_a_fetch_failure() {
    let dir = tempdir().expect("tempdir should be created");
    let config = config_in(dir.path());

    let error = run(&config, &FakeSite::default()).expect_err("page is missing");

    assert_eq!(error.kind(), "fetch_failure");
    assert!(!config.archive_path().exists());
}

#[test]
fn missing_pdf_is_retried_then_reported() {
    let dir = tempdir().expect("tempdir should be created");
    let config = config_in(dir.path());
    let site = FakeSite::default().with_page(PAGE_URL, &page_linking("/docs/Anexo_I_rol.pdf"));

    let error = run(&config, &site).expect_err("pdf is missing");

    match error {
        PipelineError::Download { attempts, .. } => assert_eq!(attempts, 3),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(site.requests.borrow().len(), 1 + 3);
    assert!(!config.download_dir.exists());
}

#[test]
fn corrupt_pdf_is_an_invalid_document() {
    let dir = tempdir().expect("tempdir should be created");
    let config = config_in(dir.path());
    let site = FakeSite::default()
        .with_page(PAGE_URL, &page_linking("/docs/Anexo_I_rol.pdf"))
        .with_file(PDF_URL, b"this is not a pdf".to_vec());

    let error = run(&config, &site).expect_err("pdf is corrupt");

    assert_eq!(error.kind(), "invalid_document");
    assert!(!config.download_dir.exists(), "downloaded file is removed");
    assert!(!config.archive_path().exists());
}

#[test]
fn header_only_tables_mean_no_tables_found() {
    let dir = tempdir().expect("tempdir should be created");
    let config = config_in(dir.path());
    let site = FakeSite::default()
        .with_page(PAGE_URL, &page_linking("/docs/Anexo_I_rol.pdf"))
        .with_file(
            PDF_URL,
            pdf_bytes(&[vec![
                "OD  AMB",
                "Este anexo lista os procedimentos obrigatorios.",
            ]]),
        );

    let error = run(&config, &site).expect_err("no data rows");

    assert!(matches!(error, PipelineError::NoTablesFound), "{error:?}");
    assert!(!config.csv_path().exists());
}

#[test]
fn failed_directory_setup_still_removes_download_dir() {
    let dir = tempdir().expect("tempdir should be created");
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").expect("blocker file");
    let config = Config {
        output_dir: blocker.join("output"),
        ..config_in(dir.path())
    };

    let site = FakeSite::default();

    let error = run(&config, &site).expect_err("output dir cannot be created");

    assert_eq!(error.kind(), "io_failure");
    assert!(!config.download_dir.exists(), "download dir is removed");
    assert!(site.requests.borrow().is_empty(), "nothing is fetched");
}
