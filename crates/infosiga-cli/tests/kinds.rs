//! Kind listing shown by `infosiga kinds`.

use infosiga_cli::summary::projection_listing;
use infosiga_model::DatasetKind;

#[test]
fn incident_columns() {
    insta::assert_snapshot!(projection_listing(DatasetKind::Incidents), @"id_sinistro, data_sinistro, hora_sinistro, cod_ibge, regiao_administrativa, municipio, logradouro, numero_logradouro, tipo_via, latitude, longitude, tp_veiculo_*, tipo_registro, gravidade_*, administracao, conservacao, jurisdicao, tp_sinistro_primario, tp_sinistro_*");
}

#[test]
fn person_columns() {
    insta::assert_snapshot!(projection_listing(DatasetKind::Persons), @"id_sinistro, data_sinistro, data_obito, sexo, idade, tipo_de_vitima, faixa_etaria_demografica, faixa_etaria_legal, tipo_veiculo_vitima, modo_deslocamento, gravidade_lesao");
}

#[test]
fn vehicle_columns() {
    insta::assert_snapshot!(projection_listing(DatasetKind::Vehicles), @"id_sinistro, id_veiculo, ano_fab, ano_modelo, cor_veiculo, tipo_veiculo");
}
